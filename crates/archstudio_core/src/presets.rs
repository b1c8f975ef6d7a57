//! crates/archstudio_core/src/presets.rs
//!
//! Closed preset catalogs for the prompt composer. Each category is a tagged
//! enum with an associated prompt-text lookup, so every selection is handled
//! exhaustively at compile time instead of flowing through loosely-typed
//! records.

/// Room presets for the interior mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomType {
    Living,
    Bedroom,
    Kitchen,
    Bathroom,
}

impl RoomType {
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "living" => Some(Self::Living),
            "bedroom" => Some(Self::Bedroom),
            "kitchen" => Some(Self::Kitchen),
            "bathroom" => Some(Self::Bathroom),
            _ => None,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Self::Living => "living",
            Self::Bedroom => "bedroom",
            Self::Kitchen => "kitchen",
            Self::Bathroom => "bathroom",
        }
    }

    pub fn prompt_text(self) -> &'static str {
        match self {
            Self::Living => "Interior design of a living room, comfortable sofa arrangement, coffee table, TV wall unit, ambient lighting, cozy and inviting atmosphere",
            Self::Bedroom => "Interior design of a master bedroom, king size bed with premium bedding, bedside tables, wardrobe, soft lighting, relaxing sanctuary vibe",
            Self::Kitchen => "Interior design of a kitchen, dining area integration, counter bar, refrigerator, built-in cabinets, clean countertops, functional layout",
            Self::Bathroom => "Interior design of a bathroom, bathtub, separate shower zone, vanity mirror with lighting, sanitary ware, clean tiles, hygienic look",
        }
    }
}

/// Decoration styles for the interior mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteriorStyle {
    Modern,
    Contemporary,
    Minimal,
    Tropical,
    Classic,
    Resort,
}

impl InteriorStyle {
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "modern" => Some(Self::Modern),
            "contemporary" => Some(Self::Contemporary),
            "minimal" => Some(Self::Minimal),
            "tropical" => Some(Self::Tropical),
            "classic" => Some(Self::Classic),
            "resort" => Some(Self::Resort),
            _ => None,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Self::Modern => "modern",
            Self::Contemporary => "contemporary",
            Self::Minimal => "minimal",
            Self::Tropical => "tropical",
            Self::Classic => "classic",
            Self::Resort => "resort",
        }
    }

    pub fn prompt_text(self) -> &'static str {
        match self {
            Self::Modern => "Modern style, sleek design, clean lines, neutral color palette, functional furniture, polished finishes",
            Self::Contemporary => "Contemporary style, current trends, sophisticated textures, curved lines, mix of materials, artistic touch",
            Self::Minimal => "Minimalist style, simplicity, clutter-free, monochromatic colors, open space, functional design, zen atmosphere",
            Self::Tropical => "Tropical style, natural materials, wood textures, indoor plants, airy atmosphere, connection to nature, resort-like feel",
            Self::Classic => "Classic luxury style, elegant moldings, rich fabrics, chandelier, symmetrical layout, timeless aesthetic, sophisticated",
            Self::Resort => "Luxury resort style, vacation vibe, spacious, natural light, premium materials, relaxing and calm environment",
        }
    }
}

/// Presentation styles for the floor-plan mode. `IsoStructure` is the one
/// preset that carries the strict layout-preserving conversion semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanStyle {
    IsoStructure,
    Blueprint,
    Neon,
    Isometric,
    Oblique,
    WoodModel,
    BlueprintGrunge,
    CreamSketch,
    IsoDarkVilla,
    WatercolorPlan,
    IsoRealistic,
}

impl PlanStyle {
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "iso_structure" => Some(Self::IsoStructure),
            "blueprint" => Some(Self::Blueprint),
            "neon" => Some(Self::Neon),
            "isometric" => Some(Self::Isometric),
            "oblique" => Some(Self::Oblique),
            "wood_model" => Some(Self::WoodModel),
            "blueprint_grunge" => Some(Self::BlueprintGrunge),
            "cream_sketch" => Some(Self::CreamSketch),
            "iso_dark_villa" => Some(Self::IsoDarkVilla),
            "watercolor_plan" => Some(Self::WatercolorPlan),
            "iso_realistic" => Some(Self::IsoRealistic),
            _ => None,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Self::IsoStructure => "iso_structure",
            Self::Blueprint => "blueprint",
            Self::Neon => "neon",
            Self::Isometric => "isometric",
            Self::Oblique => "oblique",
            Self::WoodModel => "wood_model",
            Self::BlueprintGrunge => "blueprint_grunge",
            Self::CreamSketch => "cream_sketch",
            Self::IsoDarkVilla => "iso_dark_villa",
            Self::WatercolorPlan => "watercolor_plan",
            Self::IsoRealistic => "iso_realistic",
        }
    }

    pub fn prompt_text(self) -> &'static str {
        match self {
            Self::IsoStructure => "3D Isometric floor plan view. Convert the 2D layout into 3D. Clean architectural model style. White walls, soft shadows. High angle view showing the layout depth. Strictly preserve wall positions.",
            Self::Blueprint => "Architectural blueprint style, white technical lines on blue background, precise measurements, clear lighting direction casting soft shadows to indicate depth",
            Self::Neon => "Neon cyberpunk style floor plan, glowing lines on dark background, high contrast, dramatic lighting effects with distinct cast shadows",
            Self::Isometric => "Isometric floor plan, glowing blue structural lines, dark background, bokeh effect (blurred background), depth of field, high contrast, futuristic architectural style.",
            Self::Oblique => "3D clay render style floor plan, isometric oblique view, soft rounded edges, matte finish, cute and playful miniature diorama aesthetic. Use a monochromatic single-tone color palette (shades of white, cream, or soft beige) for the entire structure and furniture. No colorful elements. Soft global illumination, strong ambient occlusion, clean and minimal toy-like appearance.",
            Self::WoodModel => "Isometric view made of light wood and matte white materials, placed on construction blueprints spread on a table. Contains miniature furniture details such as kitchen counters, wooden chairs, and gray sofas. Natural light shines through giving a soft and realistic feel. Shallow depth of field makes the background and other components slightly blurred to emphasize the focus on the room model.",
            Self::BlueprintGrunge => "Architectural floor plan, top-down view, white lines on dark blue grunge paper texture background, blueprint style, thick walls casting drop shadows for depth, detailed furniture layout including bedroom kitchen and garage, sketched white outline trees surrounding, high contrast, aesthetic architectural presentation, 2D graphic design",
            Self::CreamSketch => "Isometric architectural drawing. Detailed pencil sketch on cream-colored paper. Combination of line work and color to represent building materials such as wood and concrete. Modern wooden buildings style. Flat roof with gravel garden. High quality architectural visualization.",
            Self::IsoDarkVilla => "Isometric view, high-angle architectural visualization of a modern luxury minimalist single-story villa. The architecture features low-profile interlocking geometric volumes, blending smooth white concrete slabs with dark charcoal wood cladding and floor-to-ceiling glass windows. A sleek rectangular swimming pool with dark water reflects the structure. The building sits on a stylized abstract landscape featuring dark, wavy topographic contour lines creating a terraced effect. Minimalist landscaping with small, stylized white spherical bushes and subtle ground lighting dots the perimeter. Lighting is moody and cinematic: low-key ambient darkness with warm, inviting orange light glowing from the interior rooms and small garden lamps, creating high contrast against the cool dark environment. Photorealistic, 8k resolution, architectural model aesthetic, Octane render, highly detailed textures, sharp focus, matte finish.",
            Self::WatercolorPlan => "Professional architectural site plan, top-down 2D view, artistic hand-drawn rendering style. Medium: Watercolor painting and alcohol markers on white paper. Details: Vibrant lush greenery, varied tree canopy textures with soft drop shadows, textured stone paving, transparent blue water features, outdoor furniture details. Aesthetic: Bright and airy, high contrast, sketch lines, professional landscape design presentation, detailed material textures, 8k resolution.",
            Self::IsoRealistic => "ISOMETRIC VIEW. A photorealistic top-down architectural visualization of a modern luxury apartment floor plan. High angle view, highly detailed textures, polished concrete floors in living areas, warm oak wood flooring in bedrooms, marble tiles in bathrooms. Realistic furniture placement, soft ambient daylight casting gentle shadows, giving depth to the walls and objects. 8k resolution, octane render, architectural photography style.",
        }
    }
}

/// Scene presets for the renovation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenovationScene {
    Cafe,
    Luxury,
    Glass,
    TextureModern,
    Facade,
    Retail,
    Industrial,
    ShophouseMinimal,
    ModernFacadeDusk,
    VerticalSlats,
    CopperFacade,
    DarkMetal,
    OfficeDusk,
    LuxuryCommercial,
}

impl RenovationScene {
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "reno_cafe" => Some(Self::Cafe),
            "reno_luxury" => Some(Self::Luxury),
            "reno_glass" => Some(Self::Glass),
            "reno_texture_modern" => Some(Self::TextureModern),
            "reno_facade" => Some(Self::Facade),
            "reno_retail" => Some(Self::Retail),
            "reno_industrial" => Some(Self::Industrial),
            "reno_shophouse_minimal" => Some(Self::ShophouseMinimal),
            "reno_modern_facade_dusk" => Some(Self::ModernFacadeDusk),
            "reno_vertical_slats" => Some(Self::VerticalSlats),
            "reno_copper_facade" => Some(Self::CopperFacade),
            "reno_dark_metal" => Some(Self::DarkMetal),
            "reno_office_dusk" => Some(Self::OfficeDusk),
            "reno_luxury_commercial" => Some(Self::LuxuryCommercial),
            _ => None,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Self::Cafe => "reno_cafe",
            Self::Luxury => "reno_luxury",
            Self::Glass => "reno_glass",
            Self::TextureModern => "reno_texture_modern",
            Self::Facade => "reno_facade",
            Self::Retail => "reno_retail",
            Self::Industrial => "reno_industrial",
            Self::ShophouseMinimal => "reno_shophouse_minimal",
            Self::ModernFacadeDusk => "reno_modern_facade_dusk",
            Self::VerticalSlats => "reno_vertical_slats",
            Self::CopperFacade => "reno_copper_facade",
            Self::DarkMetal => "reno_dark_metal",
            Self::OfficeDusk => "reno_office_dusk",
            Self::LuxuryCommercial => "reno_luxury_commercial",
        }
    }

    pub fn prompt_text(self) -> &'static str {
        match self {
            Self::Cafe => "RENOVATION: Transform this old shopfront into a stylish modern cafe. Add a large display window, a stylish awning, and outdoor seating area. Use industrial chic materials like black metal and brickwork.",
            Self::Luxury => "RENOVATION: Replace the masked building with a high-end modern luxury residence. Use floor-to-ceiling glass walls, sleek concrete and warm wood accents. Preserve the exact environment, neighbors, and trees from the original photo. Match the lighting perfectly.",
            Self::Glass => "RENOVATION: Add a modern glass-box extension to the masked area of the building. Use steel frame and large glass panels. Integrate the new structure seamlessly with the existing architecture and environment.",
            Self::TextureModern => "RENOVATION: Frontal architectural photography of a contemporary residential house. The design features a striking mix of materials: rough board-formed gray concrete wall on the left, warm vertical teak wood siding at the entrance, and a prominent black vertical steel slat structure above the door. A large solid wooden pivot door serves as the focal point. Floating concrete steps lead to the entrance. Front planters are empty or filled with dark river stones, no plants. Clean lines, geometric composition, soft overcast daylight.",
            Self::Facade => "RENOVATION: Completely redesign the facade of the masked building. Use a contemporary minimalist style with vertical wooden slats and white plaster finishes. Keep the surroundings identical.",
            Self::Retail => "RENOVATION: Transform this old shopfront into a modern flagship retail store architecture, textured raw concrete facade mixed with large floor-to-ceiling glass windows, warm interior lighting glowing from inside, wooden interior furniture visible through glass.",
            Self::Industrial => "RENOVATION: Transform the building into a modern industrial luxury house. Raw textured concrete facade, weathered wood cladding accents, large black metal-framed glass windows, warm interior lighting glowing from inside, polished concrete entrance path, wabi-sabi aesthetic, overcast sky, soft cinematic lighting, photorealistic, 8k, architectural visualization.",
            Self::ShophouseMinimal => "RENOVATION: Exterior facade renovation of a two-story shophouse, minimalist modern design, white smooth plaster walls with light oak wood cladding accents, large floor-to-ceiling glass windows with thin black steel frames, clean lines, airy atmosphere, minimalist entrance, modern roof structure, minimalist interior living space with white linen sofas, light wood furniture, indoor plants, and sheer white curtains, bright natural daylight, photorealistic, 8k resolution, architectural photography, clear blue sky background.",
            Self::ModernFacadeDusk => "RENOVATION: A detailed architectural photograph of a modern minimalist house facade at dusk. The design features textured white stucco walls contrasted by a tall, vertical section of black metal slats that houses integrated vertical LED strip lighting, creating a striking light feature. A recessed entrance with a large, dark, flat panel door is illuminated by warm downlights. Large, black-framed aluminum windows are visible on both floors, reflecting the evening sky. A concrete paver walkway leads to the front door. The landscaping is minimal, with only low-lying grasses and no trees, emphasizing the clean geometric lines of the architecture.",
            Self::VerticalSlats => "RENOVATION: A photorealistic architectural visualization of a modern minimalist two-story house facade at dusk. The primary material is textured white stucco, contrasted by a prominent vertical section of black metal slats that runs from the ground to the roofline. Integrated into this black section are two tall, thin vertical LED strip lights casting a warm glow. The entrance is recessed with a large, sleek black pivot door illuminated by warm overhead downlights. Large, black-framed aluminum windows with sheer curtains are visible on both floors. A concrete paver walkway leads to the entrance, flanked by low-lying green grasses and a single tall Italian Cypress tree. The overall aesthetic is clean, geometric, and luxurious with cinematic lighting.",
            Self::CopperFacade => "RENOVATION: Transform this building into a detailed architectural photograph of a 2-story modern facade. The design features large textured white concrete panels paired with vertical copper-colored steel slats screening a glass curtain wall. The main entrance is recessed, framed by white concrete and brown wood panels, featuring a large glass door with a transom window. The ground floor interior is visible, showing a bright lobby with modern furniture. A paved walkway leads directly to the entrance. Minimal landscaping with low shrubs and gravel. Clear blue sky during the day, photorealistic 8k.",
            Self::DarkMetal => "RENOVATION: Detailed architectural photography of a 2-story modern building facade. The upper floors feature dark gray metal panels and vertical fins screening large glass walls. The ground floor entrance is a large recessed niche framed by large white stone slabs and vertical brown wooden slats, featuring double glass doors. A stone paved walkway leads to the entrance. Simple landscaping with low shrubs and gravel instead of a large garden. Emphasis on building material details. Clear blue sky during the day, photorealistic 8k.",
            Self::OfficeDusk => "RENOVATION: High-resolution architectural photography, straight frontal view of a modern 3-4 story office building. The facade design combines dark gray metal panels and rhythmic vertical fins with large floor-to-ceiling glass windows reflecting the sky. The main ground floor entrance is a deep recessed niche, clearly clad in contrasting materials like large cream stone slabs and warm brown wooden slats to create a focal point and welcoming feel. Atmosphere is dusk/twilight. Warm orange light glows from inside every floor, revealing interior details like desks and ceiling lights. The foreground is a wide plaza paved with granite or polished concrete. Only 1-2 large geometric concrete planters are placed at the entrance corners with low trimmed shrubs. No large gardens or trees blocking the building. Sky transitions from deep blue to orange at the horizon. Emphasis on sharp textures of metal, glass, wood, and stone. Photorealistic 8k.",
            Self::LuxuryCommercial => "RENOVATION: Straight frontal architectural photography of a 2-story modern luxury commercial building. The facade is designed with cream-colored stone or washed sand aggregate with a refined brick-like pattern. The key feature is three large vertical recessed panels in the wall, containing detailed slats or repetitive 3D geometric patterns, illuminated by hidden warm white LED uplights shining upwards onto the patterns and under the eaves to create beautiful light and shadow dimension. The ground floor features full-height clear glass storefronts revealing luxurious interior decoration and warm lighting. The foreground is a clean, open smooth stone plaza with no gardens or trees obscuring the building. Somber evening sky, premium atmosphere, photorealistic 8k resolution.",
        }
    }
}

/// Scene presets for the landscape mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LandscapeScene {
    Lush,
    CurvedPath,
    UrbanJungle,
    Mediterranean,
    Zen,
    ModernMix,
    StepLighting,
    TropicalPatio,
    ModernMinimal,
    Waterfall,
}

impl LandscapeScene {
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "landscape_lush" => Some(Self::Lush),
            "landscape_curved_path" => Some(Self::CurvedPath),
            "landscape_urban_jungle" => Some(Self::UrbanJungle),
            "landscape_mediterranean" => Some(Self::Mediterranean),
            "landscape_zen" => Some(Self::Zen),
            "landscape_modern_mix" => Some(Self::ModernMix),
            "landscape_step_lighting" => Some(Self::StepLighting),
            "landscape_tropical_patio" => Some(Self::TropicalPatio),
            "landscape_modern_minimal" => Some(Self::ModernMinimal),
            "landscape_waterfall" => Some(Self::Waterfall),
            _ => None,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Self::Lush => "landscape_lush",
            Self::CurvedPath => "landscape_curved_path",
            Self::UrbanJungle => "landscape_urban_jungle",
            Self::Mediterranean => "landscape_mediterranean",
            Self::Zen => "landscape_zen",
            Self::ModernMix => "landscape_modern_mix",
            Self::StepLighting => "landscape_step_lighting",
            Self::TropicalPatio => "landscape_tropical_patio",
            Self::ModernMinimal => "landscape_modern_minimal",
            Self::Waterfall => "landscape_waterfall",
        }
    }

    pub fn prompt_text(self) -> &'static str {
        match self {
            Self::Lush => "A photorealistic shot of a lush modern landscape garden. The foreground features a manicured rolling green lawn with large natural grey boulders and rounded sculpted shrubs. Tall trees with slender trunks frame the scene, casting dappled sunlight and soft shadows on the grass. In the background, a modern minimalist concrete and glass structure with a dark outdoor sofa on a terrace. Serene atmosphere, high-end architectural photography, natural lighting, depth of field, 8k resolution",
            Self::CurvedPath => "A contemporary landscape garden featuring a winding curved walkway made of two-tone grey and white terrazzo, meandering through lush greenery, flanked by low curved beige concrete retaining walls, diverse planting textures including large-leaf hostas, rosemary bushes, ferns, and horsetail reeds, young trees supported by wooden tripod stakes, modern bollard garden lights, soft overcast daylight, high-angle shot highlighting the fluid path layout, modern building facade in background, photorealistic 8k.",
            Self::UrbanJungle => "A photorealistic shot of an Urban Jungle style front garden, lush and dense greenery. A light grey concrete walkway is flanked by clusters of large-leaved tropical plants arranged in layers, featuring giant Monstera, tall Birds of Paradise, feathery palms, and patterned ground cover like Calathea Zebrina. Dappled natural sunlight filters through, creating a refreshing private forest atmosphere. Dense lush green background. 8k resolution, photorealistic.",
            Self::Mediterranean => "Luxury modern Mediterranean landscape, grand limestone staircase leading up a terraced garden, flanked by tall Italian Cypress trees and ancient Olive trees with silvery foliage, pathway with grass joints (stepping stones), soft ornamental feather grasses (Stipa) mixed with low boxwood hedges and succulents, warm beige stone retaining walls, modern villa facade with stone cladding on the left, sunny daylight, blue sky, architectural visualization, 8k, photorealistic.",
            Self::Zen => "Architectural photography of a tranquil Japanese zen courtyard garden. The ground is covered in white raked gravel with intricate wave patterns, interspersed with lush green moss islands and large natural boulders. A large, sculptural Japanese maple tree with vibrant green leaves is the centerpiece, alongside manicured pine bonsai. Features include a granite water basin (tsukubai) with a bamboo spout, and a low stone table with a traditional tea set. The backdrop is a minimalist modern house with expansive floor-to-ceiling glass sliding doors and white walls. Soft, diffused natural daylight, serene atmosphere, 8k resolution.",
            Self::ModernMix => "A photorealistic view of the modern two-story house with its white and grey siding, dark tiled roof, and black framed windows and doors. The plain ground in front is now beautifully landscaped with the natural garden scene. Large, tan landscape boulders are nestled among clusters of vibrant purple lavender, white alyssum, and feathery ornamental grasses. A winding path of irregular flagstone pavers and crushed gravel leads towards the house entrance. The garden extends across the foreground and sides, integrating with the base of the house and porch. The clear blue sky remains above.",
            Self::StepLighting => "A dramatic evening view of a modern landscaped garden staircase. Wide, curving floating concrete steps are illuminated by warm integrated LED strip lighting underneath each tread. The path is flanked by manicured, rounded boxwood topiary balls of various sizes and large, smooth, dark grey spherical stone sculptures. Multi-stemmed trees with light-colored bark are uplighted, casting shadows. A tall, textured black feature wall and a dense green wall form the background. Serene, luxurious atmosphere, architectural photography, 8k.",
            Self::TropicalPatio => "Luxury modern tropical garden patio, outdoor living space. Flooring design mixes dark grey cobblestone pavers with rectangular concrete stepping stones set in black river pebbles. Teak wood lounge chairs with grey cushions and a wooden serving trolley. Manicured round boxwood shrubs and low ground cover plants. A large sculptural tree with artistic twisting branches provides shade. Black bowl-shaped fire pits, garden bollard lights, modern house glass facade in background, warm evening atmosphere, architectural photography, 8k.",
            Self::ModernMinimal => "Wide-angle photorealistic shot of a modern minimalist front garden. Bright and airy atmosphere. A curved pathway featuring large circular washed sandstone pavers placed on vibrant green Japanese lawn, contrasting with dark grey gravel borders. The garden design incorporates drought-tolerant and sculptural plants including agave, tall cacti, fluffy ornamental grasses, and airy trees casting light shadows. In the background, a white modern box-shaped house features golden-brown wooden soffits and large clear glass walls. Sunny day with bright natural light, clear blue sky with wispy clouds. Modern, clean, and warm aesthetic, 8k resolution.",
            Self::Waterfall => "Photorealistic naturalistic landscape garden featuring a refined tiered waterfall constructed from stacked natural stone slabs, water flowing gently down into a lower pond. Decorated with large boulders and round river pebbles along the water's edge. Interspersed with lush greenery of varied textures including ornamental grasses, ferns, and small purple flowering shrubs creating a humid feel. On the left, a modern house terrace structure with wood accents and clear glass railings connects the living space to nature. Natural sunlight filters through foliage, creating sparkling glints on the water surface. Serene and relaxing luxury resort atmosphere, 8k resolution.",
        }
    }
}

/// Scene presets for the exterior mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExteriorScene {
    PoolVilla,
    Housing,
    Housing2,
    Housing3,
    Housing4,
    European,
    GreenWalkway,
    RicePaddy,
    LakeMountain,
    ResortDusk,
    Hillside,
    LakeFront,
    GreenReflection,
    KhaoYai1,
    KhaoYai2,
    TwilightPool,
}

impl ExteriorScene {
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "pool_villa" => Some(Self::PoolVilla),
            "housing" => Some(Self::Housing),
            "housing_2" => Some(Self::Housing2),
            "housing_3" => Some(Self::Housing3),
            "housing_4" => Some(Self::Housing4),
            "european" => Some(Self::European),
            "green_walkway" => Some(Self::GreenWalkway),
            "rice_paddy" => Some(Self::RicePaddy),
            "lake_mountain" => Some(Self::LakeMountain),
            "resort_dusk" => Some(Self::ResortDusk),
            "hillside" => Some(Self::Hillside),
            "lake_front" => Some(Self::LakeFront),
            "green_reflection" => Some(Self::GreenReflection),
            "khaoyai_1" => Some(Self::KhaoYai1),
            "khaoyai_2" => Some(Self::KhaoYai2),
            "twilight_pool" => Some(Self::TwilightPool),
            _ => None,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Self::PoolVilla => "pool_villa",
            Self::Housing => "housing",
            Self::Housing2 => "housing_2",
            Self::Housing3 => "housing_3",
            Self::Housing4 => "housing_4",
            Self::European => "european",
            Self::GreenWalkway => "green_walkway",
            Self::RicePaddy => "rice_paddy",
            Self::LakeMountain => "lake_mountain",
            Self::ResortDusk => "resort_dusk",
            Self::Hillside => "hillside",
            Self::LakeFront => "lake_front",
            Self::GreenReflection => "green_reflection",
            Self::KhaoYai1 => "khaoyai_1",
            Self::KhaoYai2 => "khaoyai_2",
            Self::TwilightPool => "twilight_pool",
        }
    }

    pub fn prompt_text(self) -> &'static str {
        match self {
            Self::PoolVilla => "A wide-angle architectural photograph of a luxurious modern minimalist building, viewed from the far end of its backyard under a bright clear blue sky. Two-story structure, clean white cubic forms, large glass windows. A long rectangular swimming pool with clear turquoise water runs parallel to the building. Manicured green lawn, paved walkway, wooden sun loungers. Mature palm trees and tropical plants, resort-like atmosphere. Bright midday sunlight casting sharp shadows.",
            Self::Housing => "A vibrant, modern housing estate scene. Features large, majestic transplanted trees with wooden supports (tree crutches) lining the streets and gardens, characteristic of new luxury developments. Lush, deep green manicured lawns. The architecture is modern and fresh. Clean, wide concrete or asphalt roads with no clutter. Bright, sunny atmosphere with blue sky. 8k resolution, highly detailed real estate photography.",
            Self::Housing2 => "A realistic Thai housing estate atmosphere in bright daytime sunlight. Strictly preserve the original camera angle. Features a concrete or asphalt road in the foreground. The house fence is a mix of green hedges and black iron railings. Includes typical Thai electric poles and power lines along the road. Shady trees providing a natural and livable look. Authentic Thai suburban style. 8k resolution, photorealistic.",
            Self::Housing3 => "A magnificent luxury mansion situated in an ultra-high-end exclusive housing estate. The architecture is grand and imposing. The property is surrounded by tall, perfectly trimmed manicured hedge fences providing privacy and elegance. The foreground features a very wide, clean, spacious paved road or boulevard, emphasizing grandeur. The overall atmosphere is expensive, orderly, prestigious, and pristine. Bright natural daylight, professional real estate photography, 8k resolution.",
            Self::Housing4 => "A lively and vibrant modern Thai housing estate. The most prominent feature is the newly planted large trees with wooden props/crutches supporting them, typical of new landscaping. The lawns are lush green and perfectly manicured. The village streets are clean and wide. The atmosphere is sunny, fresh, and inviting. Modern architectural style. 8k resolution, photorealistic.",
            Self::European => "A grand architectural photograph situated in an opulent formal French garden estate. A long, elegant light-beige cobblestone paved driveway leads centrally towards the structure. Foreground dominated by perfectly manicured geometric boxwood hedges, low-trimmed garden mazes, and symmetrical cone-shaped cypress trees. Lush vibrant green lawns. Dramatic sky with textured clouds. Soft diffused natural daylight. High-end real estate photography.",
            Self::GreenWalkway => "A photorealistic architectural photograph nestled in a lush, mature woodland garden. A winding light-grey flagstone pathway leads from the foreground gate towards the building, flanked by manicured green lawns and rice fields. Bright clear natural sunlight, high contrast, vivid colors, bird's eye view perspective.",
            Self::RicePaddy => "A stunning architectural photograph situated in the middle of vast, vibrant green rice paddy fields. Background features a majestic layering mountain range under a bright blue sky. A long straight paved concrete driveway leads from the foreground gate towards the building, flanked by manicured green lawns and rice fields. Bright clear natural sunlight, high contrast, vivid colors, bird's eye view perspective.",
            Self::LakeMountain => "High-angle bird's eye perspective. Bright warm sunlight with sharp shadows. Vibrant blue sky with fluffy white clouds. Rugged mountainous terrain with snow-capped peaks in the distance, forested slopes. A large, reflective deep blue lake in the foreground or middle ground. Meticulously landscaped hillside with green lawns, stone pathways, and a clear blue swimming pool nearby.",
            Self::ResortDusk => "High-resolution photograph of a resort or residential area at dusk/twilight. Blue-grey sky with wispy clouds. Meticulously designed gardens, lush greenery, large shade trees, pines, shrubs, and colorful flowers. Concrete or stone walkways winding through the garden. Water features or swimming pool reflecting the sky. Asphalt or concrete internal roads with garden lights and warm building lights creating a cozy atmosphere.",
            Self::Hillside => "Vibrant mountain landscape teeming with lush green forests and expansive meadows under a bright cloud-dotted sky. A collection of structures arranged across the hillside. Modern tropical elements with thatch or flat roofs, stone, and wood. Features infinity pools, terraces, wooden walkways, and pavilions. Diverse vegetation and natural setting.",
            Self::LakeFront => "8K landscape photograph. Peaceful and fresh waterfront atmosphere. Foreground is a large still lake acting as a mirror reflecting the sky and landscape. Green manicured lawns along the bank, interspersed with gravel and natural stone paths. Background of lush rainforest and large mountains. Soft lighting, scattered clouds. The building sits harmoniously with nature.",
            Self::GreenReflection => "High-resolution landscape photograph emphasizing tranquility. Foreground is a fresh green lawn, manicured and smooth, leading to the edge of a large lake. Still water surface reflecting the surroundings perfectly. Background of towering mountains covered in dense green rainforest. Big trees framing the water. Diffused soft morning light. The building is placed harmoniously in this setting.",
            Self::KhaoYai1 => "Modern two-story house with distinctive design. Exterior walls mix exposed concrete and black structure with wooden slats. Large floor-to-ceiling glass windows. Located amidst lush natural landscape. Background is a dense forest mountain range. Foreground features a reflecting pool, wide smooth lawn, and flower garden. Morning natural sunlight, peaceful and luxurious.",
            Self::KhaoYai2 => "Modern resort style built of stone and wood, nestled in lush greenery. Tranquil atmosphere. Wide lawn bordered by white and purple flowering plants. A pool reflecting the building. Large trees including mango trees providing shade. Forested mountain backdrop. Afternoon sunlight bathing the scene in a relaxing ambiance.",
            Self::TwilightPool => "Cinematic, photorealistic architectural landscape at twilight (Blue Hour). Foreground features a sleek dark-tiled swimming pool with mirror-like reflections. Wooden deck, built-in lounge seating, dining area. Illuminated by cozy warm golden floor lanterns and interior lights contrasting with the deep blue sky. Lush green hillside background.",
        }
    }
}

/// Architecture styles for the exterior mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchStyle {
    Modern,
    Contemporary,
    Minimal,
    European,
    Scandi,
    Tropical,
}

impl ArchStyle {
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "modern" => Some(Self::Modern),
            "contemporary" => Some(Self::Contemporary),
            "minimal" => Some(Self::Minimal),
            "european" => Some(Self::European),
            "scandi" => Some(Self::Scandi),
            "tropical" => Some(Self::Tropical),
            _ => None,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Self::Modern => "modern",
            Self::Contemporary => "contemporary",
            Self::Minimal => "minimal",
            Self::European => "european",
            Self::Scandi => "scandi",
            Self::Tropical => "tropical",
        }
    }

    pub fn prompt_text(self) -> &'static str {
        match self {
            Self::Modern => "Modern architecture, sleek design, clean lines, glass and concrete materials, geometric shapes, minimalist approach, high-end look",
            Self::Contemporary => "Contemporary architecture, fluid lines, asymmetry, eco-friendly materials, natural light integration, innovative design, artistic expression",
            Self::Minimal => "Minimalist architecture, extreme simplicity, monochromatic palette, open floor plans, absence of clutter, functional design, zen atmosphere",
            Self::European => "European classic architecture, elegant proportions, ornamental details, stone textures, steep roofs, historic charm, grand facade",
            Self::Scandi => "Scandinavian architecture, nordic style, light wood timber, white walls, cozy atmosphere (hygge), functionalism, clean and bright",
            Self::Tropical => "Tropical architecture, lush greenery integration, wooden screens, large overhangs, resort vibe, natural ventilation, relaxing atmosphere, exotic materials",
        }
    }
}

/// An architecture-style selection. Unlike the other categories, a raw
/// free-form id is accepted and passed through verbatim when it maps to no
/// known preset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchStyleChoice {
    Preset(ArchStyle),
    Custom(String),
}

impl ArchStyleChoice {
    pub fn parse(id: &str) -> Self {
        match ArchStyle::from_id(id) {
            Some(style) => Self::Preset(style),
            None => Self::Custom(id.to_string()),
        }
    }

    pub fn prompt_text(&self) -> &str {
        match self {
            Self::Preset(style) => style.prompt_text(),
            Self::Custom(raw) => raw,
        }
    }
}

/// Rendering medium applied across every mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderStyle {
    #[default]
    Photo,
    Anime,
    Sketch,
    Oil,
    ColorPencil,
    Magic,
}

impl RenderStyle {
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "photo" => Some(Self::Photo),
            "anime" => Some(Self::Anime),
            "sketch" => Some(Self::Sketch),
            "oil" => Some(Self::Oil),
            "colorpencil" => Some(Self::ColorPencil),
            "magic" => Some(Self::Magic),
            _ => None,
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Self::Photo => "photo",
            Self::Anime => "anime",
            Self::Sketch => "sketch",
            Self::Oil => "oil",
            Self::ColorPencil => "colorpencil",
            Self::Magic => "magic",
        }
    }

    pub fn prompt_text(self) -> &'static str {
        match self {
            Self::Photo => "photorealistic, 4k, highly detailed, realistic texture",
            Self::Anime => "anime art style, japanese animation, cel shading, vibrant colors",
            Self::Sketch => "pencil sketch, graphite drawing, hand drawn, monochrome, artistic sketch",
            Self::Oil => "oil painting style, textured brushstrokes, canvas texture, artistic",
            Self::ColorPencil => "colored pencil drawing, soft textures, hand drawn, artistic",
            Self::Magic => "magic marker illustration, bold lines, vibrant colors, marker texture",
        }
    }
}
