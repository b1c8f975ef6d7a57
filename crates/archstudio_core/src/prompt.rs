//! crates/archstudio_core/src/prompt.rs
//!
//! The prompt composer: deterministically assembles the textual instruction
//! sent to the image-generation provider from the active mode, the preset
//! selections and the free-text fields. Pure, no I/O.

use crate::presets::{
    ArchStyleChoice, ExteriorScene, InteriorStyle, LandscapeScene, PlanStyle, RenderStyle,
    RenovationScene, RoomType,
};

/// Fixed negative suffix, always appended last.
const DEFAULT_NEGATIVE_PROMPT: &str = "low quality, low resolution, blurry, distorted, watermark, text, signature, bad composition, ugly, geometric imperfections, changing background, changing room layout, changing lighting, distortion";

/// A free-text description longer than this is treated as an authoritative
/// layout description in the 2D-plan interior flow, replacing the generic
/// scan/lock/render instruction sequence.
const AUTHORITATIVE_DESCRIPTION_CHARS: usize = 50;

/// The active editing tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorMode {
    #[default]
    Exterior,
    Interior,
    Plan,
    Renovation,
    Landscape,
}

impl EditorMode {
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "exterior" => Some(Self::Exterior),
            "interior" => Some(Self::Interior),
            "plan" => Some(Self::Plan),
            "renovation" => Some(Self::Renovation),
            "landscape" => Some(Self::Landscape),
            _ => None,
        }
    }
}

/// Where the interior input image comes from. Only meaningful in interior
/// mode; `Standard` elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteriorSource {
    #[default]
    Standard,
    /// Derive a 3D interior from an uploaded 2D floor plan.
    FromPlan,
    /// Re-render an uploaded 3D model screenshot with real materials.
    FromModel,
}

impl InteriorSource {
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "standard" => Some(Self::Standard),
            "from_plan" => Some(Self::FromPlan),
            "from_model" => Some(Self::FromModel),
            _ => None,
        }
    }
}

/// The preset selections active for one generation request.
#[derive(Debug, Clone, Default)]
pub struct Selections {
    pub arch_style: Option<ArchStyleChoice>,
    pub exterior_scene: Option<ExteriorScene>,
    pub room_type: Option<RoomType>,
    pub interior_style: Option<InteriorStyle>,
    pub plan_style: Option<PlanStyle>,
    pub renovation_scene: Option<RenovationScene>,
    pub landscape_scene: Option<LandscapeScene>,
    pub render_style: RenderStyle,
}

/// Everything the composer needs for one invocation. Transient, rebuilt per
/// request.
#[derive(Debug, Clone)]
pub struct PromptRequest<'a> {
    pub mode: EditorMode,
    pub interior_source: InteriorSource,
    pub selections: &'a Selections,
    /// Free-text description ("Description").
    pub description: &'a str,
    /// Free-text edit command ("Additional Command / Edit").
    pub edit_command: &'a str,
    /// The active input image, after auto-chaining resolution.
    pub has_input_image: bool,
    pub has_reference_image: bool,
}

impl PromptRequest<'_> {
    fn description_is_authoritative(&self) -> bool {
        self.mode == EditorMode::Interior
            && self.interior_source == InteriorSource::FromPlan
            && self.has_input_image
            && self.description.chars().count() > AUTHORITATIVE_DESCRIPTION_CHARS
    }
}

/// Builds the full instruction text for one generation call.
pub fn compose(req: &PromptRequest) -> String {
    let sel = req.selections;
    let render_style = sel.render_style.prompt_text();
    let mut out = String::new();

    match req.mode {
        EditorMode::Interior => compose_interior(req, &mut out),
        EditorMode::Plan => {
            out.push_str("Generate a high quality architectural floor plan. ");
            if let Some(style) = sel.plan_style {
                out.push_str(style.prompt_text());
                out.push_str(". ");
            }
            if !req.description.is_empty() {
                out.push_str(&format!("Description: {}. ", req.description));
            }
            if !req.edit_command.is_empty() {
                out.push_str(&format!("Additional Instructions: {}. ", req.edit_command));
            }
            out.push_str(&format!("Render Style: {}. ", render_style));
        }
        EditorMode::Renovation => {
            out.push_str("[TASK: ARCHITECTURAL RENOVATION & EXTENSION]\n");
            out.push_str(
                "INPUT ANALYSIS: Analyze the provided image (existing structure, perspective, lighting).\n",
            );
            let instruction = scene_instruction(
                sel.renovation_scene.map(RenovationScene::prompt_text),
                req.description,
                req.edit_command,
            );
            out.push_str(&format!("RENOVATION INSTRUCTION: {}\n", instruction));
            out.push_str("STRICT CONSTRAINTS:\n");
            out.push_str("1. PRESERVE PERSPECTIVE: The camera angle and perspective MUST remain identical to the original image.\n");
            out.push_str("2. SEAMLESS BLENDING: The new elements (extension/renovation) must match the lighting, shadows, and texture quality of the existing structure.\n");
            out.push_str("3. STRUCTURAL INTEGRITY: Do not distort the existing building unless explicitly asked to modify it.\n");
            out.push_str(&format!("Render Style: {}. Photorealistic 8K.", render_style));
        }
        EditorMode::Landscape => {
            out.push_str("[TASK: LANDSCAPE DESIGN & GARDENING]\n");
            out.push_str(
                "INPUT ANALYSIS: Identify the building structure and protect it. Identify the ground/garden area.\n",
            );
            let instruction = scene_instruction(
                sel.landscape_scene.map(LandscapeScene::prompt_text),
                req.description,
                req.edit_command,
            );
            out.push_str(&format!("LANDSCAPE INSTRUCTION: {}\n", instruction));
            out.push_str("STRICT CONSTRAINTS:\n");
            out.push_str("1. PRESERVE ARCHITECTURE: Do NOT change the house building, walls, roof, or structure. Only change the garden/ground/plants.\n");
            out.push_str("2. REALISTIC PLANTING: Use photorealistic textures for grass, gravel, and plants.\n");
            out.push_str(&format!("Render Style: {}. Photorealistic 8K.", render_style));
        }
        EditorMode::Exterior => {
            out.push_str("Generate a high quality image of exterior view. ");
            if let Some(scene) = sel.exterior_scene {
                out.push_str(scene.prompt_text());
                out.push(' ');
            }
            if let Some(style) = &sel.arch_style {
                out.push_str(&format!("Architecture Style: {}. ", style.prompt_text()));
            }
            if !req.description.is_empty() {
                out.push_str(&format!("Additional Details: {}. ", req.description));
            }
            out.push_str(&format!("Render Style: {}. ", render_style));
        }
    }

    append_image_instructions(req, &mut out);

    // Style transfer takes priority over the single-image instruction.
    if req.has_input_image && req.has_reference_image {
        out.push_str(" [Instruction]: Use the first image as the main structural base. Use the second image as a reference for style. Blend the aesthetic of the second image into the first image.");
    } else if req.has_input_image {
        let single_image_note = match (req.mode, req.interior_source) {
            (EditorMode::Plan, _)
            | (EditorMode::Renovation, _)
            | (EditorMode::Landscape, _)
            | (EditorMode::Interior, InteriorSource::FromPlan)
            | (EditorMode::Interior, InteriorSource::FromModel) => false,
            _ => true,
        };
        if single_image_note {
            out.push_str(" [Instruction]: You must use the provided image as the strict reference for composition. DO NOT change the style. DO NOT change the overall structure.");
        }
    } else if req.has_reference_image {
        out.push_str(" [Instruction]: Use this image as a style reference.");
    }

    out.push_str(&format!("Exclude: {}.", DEFAULT_NEGATIVE_PROMPT));
    out
}

/// Interior-mode base instruction, including the strict 2D-plan and 3D-model
/// derivation blocks.
fn compose_interior(req: &PromptRequest, out: &mut String) {
    let sel = req.selections;

    match (req.interior_source, req.has_input_image) {
        (InteriorSource::FromPlan, true) => {
            out.push_str("[ROLE: SENIOR ARCHITECTURAL VISUALIZER]\n");
            out.push_str("TASK: Convert 2D Floor Plan to 3D Interior. 100% ACCURACY REQUIRED.\n");
            if req.description_is_authoritative() {
                // A long description is assumed to come from plan analysis;
                // it replaces the generic scan/lock/render sequence.
                out.push_str(&format!(
                    "[STRICT VISUAL INSTRUCTIONS]:\n{}\n\n",
                    req.description
                ));
                out.push_str("INSTRUCTION: The above text describes the EXACT layout found in the input image. You MUST follow it for furniture placement, lighting, and materials.\n");
            } else {
                out.push_str("CHAIN OF THOUGHT PROCESS:\n");
                out.push_str("1. SCAN INPUT: Identify the exact pixel coordinates of the Bed, Wardrobe, Nightstands, Door, and Windows.\n");
                out.push_str("2. GEOMETRY LOCK: Create a rigid 3D bounding box for each furniture item found. DO NOT MOVE THEM. DO NOT ROTATE THEM. DO NOT RESIZE THEM.\n");
                out.push_str("3. RENDER: Apply the requested style to these LOCKED coordinates.\n");
            }
            out.push_str("OUTPUT REQUIREMENT: The final image must perfectly match the layout of the source plan. If the bed is on the left in the plan, it MUST be on the left in the render.\n");
        }
        (InteriorSource::FromModel, true) => {
            out.push_str("[TASK: RENDER 3D MODEL SCREENSHOT TO PHOTOREALISM]\n");
            out.push_str("INPUT ANALYSIS: The input image is a raw 3D model screenshot (e.g., SketchUp, Revit, Rhino) or a white model.\n");
            out.push_str("INSTRUCTION: Apply realistic materials, textures, and lighting to the EXISTING geometry. DO NOT change the structure. Turn the 'clay' or 'viewport' look into a high-end photograph. Keep the camera angle exactly the same.\n");
            out.push_str("Strictly preserve the geometry of the input image. Analyze the position of every furniture piece and keep it exactly where it is. Apply realistic textures and lighting only.\n");
        }
        _ => out.push_str("Generate a high quality interior design image. "),
    }

    if let Some(room) = sel.room_type {
        out.push_str(room.prompt_text());
        out.push_str(". ");
    }
    if let Some(style) = sel.interior_style {
        out.push_str(style.prompt_text());
        out.push_str(". ");
    }
    // An authoritative description is already embedded above; never repeat it
    // under "Additional Details".
    if !req.description_is_authoritative() && !req.description.is_empty() {
        out.push_str(&format!("Additional Details: {}. ", req.description));
    }
    out.push_str(&format!(
        "Render Style: {}. ",
        sel.render_style.prompt_text()
    ));
}

/// Merges the selected scene preset with the free-text description and the
/// edit command for the renovation and landscape flows.
fn scene_instruction(scene_text: Option<&str>, description: &str, edit_command: &str) -> String {
    let mut instruction = match scene_text {
        Some(text) => {
            let mut s = text.to_string();
            if !description.trim().is_empty() {
                s.push_str(&format!(" Additional details: {}", description));
            }
            s
        }
        None => description.to_string(),
    };
    if !edit_command.is_empty() {
        instruction.push_str(&format!(" [EDIT COMMAND]: {}", edit_command));
    }
    instruction
}

/// Cross-cutting instructions keyed on the presence of the active input
/// image and the edit command.
fn append_image_instructions(req: &PromptRequest, out: &mut String) {
    if req.has_input_image {
        match (req.mode, req.interior_source) {
            (EditorMode::Plan, _) => {
                if req.selections.plan_style == Some(PlanStyle::IsoStructure) {
                    out.push_str(" [Instruction]: STRICT CONVERSION. Convert this 2D plan into a 3D Isometric view. You MUST preserve the exact wall layout, proportions, and furniture placement of the source image. Do not change the design. Only change the perspective to 3D Isometric.");
                } else {
                    out.push_str(" [Instruction]: Analyze this image (sketch or plan). Redraw it as a high-quality floor plan in the specified style, maintaining the layout but enhancing clarity and aesthetics.");
                }
            }
            // Handled by the mode-specific instruction blocks.
            (EditorMode::Interior, InteriorSource::FromPlan)
            | (EditorMode::Interior, InteriorSource::FromModel)
            | (EditorMode::Renovation, _)
            | (EditorMode::Landscape, _) => {}
            _ => {
                if !req.edit_command.is_empty() {
                    out.push_str("\n[CRITICAL INSTRUCTION: PRECISE EDITING MODE]");
                    out.push_str("\nTASK: Apply the user command to the provided input image.");
                    out.push_str(&format!("\nUSER COMMAND: \"{}\"", req.edit_command));
                    out.push_str("\n\nSTRICT CONSTRAINTS (DO NOT IGNORE):");
                    out.push_str("\n1. FROZEN BACKGROUND: Do NOT change the camera angle, lighting, room layout, walls, floor, ceiling, or existing furniture. The scene must remain EXACTLY the same.");
                    out.push_str("\n2. TARGETED EDIT ONLY: Only add or modify the specific object or area mentioned in the command.");
                    out.push_str("\n3. STYLE MATCHING: The new object must match the lighting, perspective, and style of the original image.");
                    out.push_str("\n4. NO RE-IMAGINING: This is an EDIT, not a new generation. Do not hallucinate new details outside the command.");
                } else {
                    out.push_str(" [STRICT CONSTRAINT]: Preserve the original image style, camera angle, composition, and lighting exactly. Do not change the overall look. ");
                    if !req.description.is_empty() && !out.contains(req.description) {
                        out.push_str(&format!(
                            "ACTION: Edit based on: \"{}\". Keep everything else exactly the same. ",
                            req.description
                        ));
                    }
                }
            }
        }
    } else if !req.edit_command.is_empty() {
        out.push_str(&format!("Additional details: {}. ", req.edit_command));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::ArchStyle;

    fn base_selections() -> Selections {
        Selections::default()
    }

    #[test]
    fn compose_is_deterministic() {
        let selections = Selections {
            arch_style: Some(ArchStyleChoice::Preset(ArchStyle::Modern)),
            exterior_scene: Some(ExteriorScene::PoolVilla),
            ..base_selections()
        };
        let req = PromptRequest {
            mode: EditorMode::Exterior,
            interior_source: InteriorSource::Standard,
            selections: &selections,
            description: "with a rooftop terrace",
            edit_command: "",
            has_input_image: false,
            has_reference_image: false,
        };
        assert_eq!(compose(&req), compose(&req));
    }

    #[test]
    fn exterior_includes_scene_style_and_negative_suffix() {
        let selections = Selections {
            arch_style: Some(ArchStyleChoice::Preset(ArchStyle::Tropical)),
            exterior_scene: Some(ExteriorScene::RicePaddy),
            ..base_selections()
        };
        let req = PromptRequest {
            mode: EditorMode::Exterior,
            interior_source: InteriorSource::Standard,
            selections: &selections,
            description: "two carports",
            edit_command: "",
            has_input_image: false,
            has_reference_image: false,
        };
        let prompt = compose(&req);
        assert!(prompt.starts_with("Generate a high quality image of exterior view. "));
        assert!(prompt.contains(ExteriorScene::RicePaddy.prompt_text()));
        assert!(prompt.contains(ArchStyle::Tropical.prompt_text()));
        assert!(prompt.contains("Additional Details: two carports. "));
        assert!(prompt.ends_with(&format!("Exclude: {}.", DEFAULT_NEGATIVE_PROMPT)));
    }

    #[test]
    fn unknown_arch_style_falls_back_to_raw_id() {
        let selections = Selections {
            arch_style: Some(ArchStyleChoice::parse("brutalist")),
            ..base_selections()
        };
        let req = PromptRequest {
            mode: EditorMode::Exterior,
            interior_source: InteriorSource::Standard,
            selections: &selections,
            description: "",
            edit_command: "",
            has_input_image: false,
            has_reference_image: false,
        };
        assert!(compose(&req).contains("Architecture Style: brutalist. "));
    }

    #[test]
    fn plan_iso_structure_with_image_uses_strict_conversion_only() {
        let selections = Selections {
            plan_style: Some(PlanStyle::IsoStructure),
            ..base_selections()
        };
        let req = PromptRequest {
            mode: EditorMode::Plan,
            interior_source: InteriorSource::Standard,
            selections: &selections,
            description: "",
            edit_command: "",
            has_input_image: true,
            has_reference_image: false,
        };
        let prompt = compose(&req);
        assert!(prompt.contains("STRICT CONVERSION"));
        assert!(!prompt.contains("Redraw it as a high-quality floor plan"));
    }

    #[test]
    fn plan_other_styles_with_image_use_generic_redraw() {
        let selections = Selections {
            plan_style: Some(PlanStyle::Blueprint),
            ..base_selections()
        };
        let req = PromptRequest {
            mode: EditorMode::Plan,
            interior_source: InteriorSource::Standard,
            selections: &selections,
            description: "",
            edit_command: "",
            has_input_image: true,
            has_reference_image: false,
        };
        let prompt = compose(&req);
        assert!(prompt.contains("Redraw it as a high-quality floor plan"));
        assert!(!prompt.contains("STRICT CONVERSION"));
    }

    #[test]
    fn long_plan_description_is_embedded_exactly_once() {
        let description = "Eye-level view of a modern bedroom, bed on the left wall, desk opposite";
        assert!(description.chars().count() > AUTHORITATIVE_DESCRIPTION_CHARS);
        let selections = Selections {
            room_type: Some(RoomType::Bedroom),
            interior_style: Some(InteriorStyle::Modern),
            ..base_selections()
        };
        let req = PromptRequest {
            mode: EditorMode::Interior,
            interior_source: InteriorSource::FromPlan,
            selections: &selections,
            description,
            edit_command: "",
            has_input_image: true,
            has_reference_image: false,
        };
        let prompt = compose(&req);
        assert_eq!(prompt.matches(description).count(), 1);
        assert!(prompt.contains("[STRICT VISUAL INSTRUCTIONS]"));
        assert!(!prompt.contains("Additional Details:"));
        assert!(!prompt.contains("CHAIN OF THOUGHT PROCESS"));
    }

    #[test]
    fn short_plan_description_uses_scan_lock_render_sequence() {
        let selections = base_selections();
        let req = PromptRequest {
            mode: EditorMode::Interior,
            interior_source: InteriorSource::FromPlan,
            selections: &selections,
            description: "cozy vibe",
            edit_command: "",
            has_input_image: true,
            has_reference_image: false,
        };
        let prompt = compose(&req);
        assert!(prompt.contains("CHAIN OF THOUGHT PROCESS"));
        assert!(prompt.contains("Additional Details: cozy vibe. "));
    }

    #[test]
    fn edit_command_with_input_image_enters_precise_editing_mode() {
        let selections = base_selections();
        let req = PromptRequest {
            mode: EditorMode::Exterior,
            interior_source: InteriorSource::Standard,
            selections: &selections,
            description: "",
            edit_command: "add a red awning over the door",
            has_input_image: true,
            has_reference_image: false,
        };
        let prompt = compose(&req);
        assert!(prompt.contains("[CRITICAL INSTRUCTION: PRECISE EDITING MODE]"));
        assert!(prompt.contains("add a red awning over the door"));
        assert!(prompt.contains("NO RE-IMAGINING"));
    }

    #[test]
    fn input_image_without_command_preserves_everything() {
        let selections = base_selections();
        let req = PromptRequest {
            mode: EditorMode::Exterior,
            interior_source: InteriorSource::Standard,
            selections: &selections,
            description: "",
            edit_command: "",
            has_input_image: true,
            has_reference_image: false,
        };
        let prompt = compose(&req);
        assert!(prompt.contains("[STRICT CONSTRAINT]: Preserve the original image style"));
        assert!(!prompt.contains("PRECISE EDITING MODE"));
    }

    #[test]
    fn style_transfer_takes_priority_over_single_image_instruction() {
        let selections = base_selections();
        let req = PromptRequest {
            mode: EditorMode::Exterior,
            interior_source: InteriorSource::Standard,
            selections: &selections,
            description: "",
            edit_command: "",
            has_input_image: true,
            has_reference_image: true,
        };
        let prompt = compose(&req);
        assert!(prompt.contains("Use the second image as a reference for style"));
        assert!(!prompt.contains("strict reference for composition"));
    }

    #[test]
    fn renovation_merges_scene_details_and_edit_command() {
        let selections = Selections {
            renovation_scene: Some(RenovationScene::Cafe),
            ..base_selections()
        };
        let req = PromptRequest {
            mode: EditorMode::Renovation,
            interior_source: InteriorSource::Standard,
            selections: &selections,
            description: "keep the sign",
            edit_command: "wider entrance",
            has_input_image: true,
            has_reference_image: false,
        };
        let prompt = compose(&req);
        assert!(prompt.contains(RenovationScene::Cafe.prompt_text()));
        assert!(prompt.contains("Additional details: keep the sign"));
        assert!(prompt.contains("[EDIT COMMAND]: wider entrance"));
        assert!(prompt.contains("PRESERVE PERSPECTIVE"));
    }

    #[test]
    fn landscape_preserves_architecture_clause() {
        let selections = Selections {
            landscape_scene: Some(LandscapeScene::Zen),
            ..base_selections()
        };
        let req = PromptRequest {
            mode: EditorMode::Landscape,
            interior_source: InteriorSource::Standard,
            selections: &selections,
            description: "",
            edit_command: "",
            has_input_image: true,
            has_reference_image: false,
        };
        let prompt = compose(&req);
        assert!(prompt.contains("PRESERVE ARCHITECTURE"));
        assert!(prompt.contains(LandscapeScene::Zen.prompt_text()));
    }
}
