//! The fixed skill taxonomy: four categories, 28 skills.
//!
//! Order matters. Prompts, the JSON skeleton the model is asked to fill, and the
//! overview chart all walk the taxonomy in the order declared here.

use serde::Serialize;

pub struct Skill {
    pub name: &'static str,
    pub definition: &'static str,
}

pub struct Category {
    pub name: &'static str,
    /// Direction of this category's corner on the quadrant chart (x right, y down).
    pub direction: (f64, f64),
    pub skills: &'static [Skill],
}

pub const PROFESSIONAL: &str = "Professional Skills";
pub const INNOVATION: &str = "Innovation Skills";
pub const DIGITAL: &str = "Digital Skills";
pub const LEADERSHIP: &str = "Leadership Skills";

pub static TAXONOMY: [Category; 4] = [
    Category {
        name: PROFESSIONAL,
        direction: (-1.0, -1.0),
        skills: &[
            Skill {
                name: "Communication",
                definition: "The ability to convey information clearly and effectively in various contexts.",
            },
            Skill {
                name: "Time Management",
                definition: "Effectively planning and controlling how much time to spend on specific activities.",
            },
            Skill {
                name: "Decision Making",
                definition: "Choosing between two or more courses of action in a thoughtful, reasoned manner.",
            },
            Skill {
                name: "Influencing",
                definition: "Persuading or shaping the opinions and actions of others to achieve desired outcomes.",
            },
            Skill {
                name: "Storytelling",
                definition: "Communicating information, experiences, or lessons in a structured narrative format.",
            },
            Skill {
                name: "Planning",
                definition: "Organizing tasks, resources, and timelines to achieve specific goals or outcomes.",
            },
            Skill {
                name: "Research Ability",
                definition: "Gathering, analyzing, and synthesizing information to inform decisions or solutions.",
            },
        ],
    },
    Category {
        name: INNOVATION,
        direction: (1.0, -1.0),
        skills: &[
            Skill {
                name: "Observation",
                definition: "Carefully noticing and interpreting details in data, environments, or behavior.",
            },
            Skill {
                name: "Risk Taking",
                definition: "Willingness to engage in actions that may have uncertain outcomes.",
            },
            Skill {
                name: "Creativity",
                definition: "Generating novel and useful ideas or solutions to problems.",
            },
            Skill {
                name: "Innovation Processes",
                definition: "Systematically developing, testing, and refining new ideas or methods.",
            },
            Skill {
                name: "Complex Problem Solving",
                definition: "Identifying, analyzing, and solving multifaceted or ill-defined problems.",
            },
            Skill {
                name: "Collaboration",
                definition: "Working effectively with others to achieve shared objectives.",
            },
            Skill {
                name: "Critical Thinking",
                definition: "Analyzing facts and evidence to form a judgment or solution.",
            },
        ],
    },
    Category {
        name: DIGITAL,
        direction: (-1.0, 1.0),
        skills: &[
            Skill {
                name: "Digital Fluency",
                definition: "Proficiency with digital tools, platforms, and technologies.",
            },
            Skill {
                name: "Scrum",
                definition: "A framework for agile product development that emphasizes collaboration and iteration.",
            },
            Skill {
                name: "Agile",
                definition: "An iterative approach to project management and software development.",
            },
            Skill {
                name: "Data Visualization",
                definition: "Representing data in graphical or visual formats to aid understanding.",
            },
            Skill {
                name: "Customer Success",
                definition: "Ensuring customers achieve their desired outcomes while using a product or service.",
            },
            Skill {
                name: "UX Design",
                definition: "Designing user-centered products that provide a meaningful and relevant experience.",
            },
            Skill {
                name: "Tech Talent Management",
                definition: "Recruiting, developing, and retaining technology professionals.",
            },
            Skill {
                name: "AI fluency",
                definition: "Understanding AI concepts, tools, and potential applications.",
            },
        ],
    },
    Category {
        name: LEADERSHIP,
        direction: (1.0, 1.0),
        skills: &[
            Skill {
                name: "Leadership Skills",
                definition: "Guiding and motivating individuals or teams to achieve organizational goals.",
            },
            Skill {
                name: "Culture Development",
                definition: "Shaping and nurturing the values, norms, and behaviors within an organization.",
            },
            Skill {
                name: "People Management",
                definition: "Coordinating and developing individuals and teams to optimize performance.",
            },
            Skill {
                name: "Change Management",
                definition: "Leading and supporting individuals and organizations through transitions or transformations.",
            },
            Skill {
                name: "Business Sense",
                definition: "Understanding how businesses operate, generate revenue, and remain competitive.",
            },
            Skill {
                name: "Strategic Thinking",
                definition: "Formulating and implementing plans that align with long-term objectives.",
            },
        ],
    },
];

pub fn category(name: &str) -> Option<&'static Category> {
    TAXONOMY.iter().find(|c| c.name == name)
}

pub fn skill_count() -> usize {
    TAXONOMY.iter().map(|c| c.skills.len()).sum()
}

/// Bulleted category/skill listing embedded in scoring prompts.
pub fn render_listing() -> String {
    TAXONOMY
        .iter()
        .map(|c| {
            let skills: Vec<String> = c.skills.iter().map(|s| format!("- {}", s.name)).collect();
            format!("{}:\n{}", c.name, skills.join("\n"))
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// The JSON shape the model must fill, with `<number>` in place of every score.
pub fn render_score_skeleton() -> String {
    let categories: Vec<String> = TAXONOMY
        .iter()
        .map(|c| {
            let skills: Vec<String> = c
                .skills
                .iter()
                .map(|s| format!("    \"{}\": <number>", s.name))
                .collect();
            format!("  \"{}\": {{\n{}\n  }}", c.name, skills.join(",\n"))
        })
        .collect();
    format!("{{\n{}\n}}", categories.join(",\n"))
}

// ── Serializable view for GET /api/skills ───────────────────────────────────

#[derive(Debug, Serialize)]
pub struct SkillView {
    pub name: &'static str,
    pub definition: &'static str,
}

#[derive(Debug, Serialize)]
pub struct CategoryView {
    pub name: &'static str,
    pub skills: Vec<SkillView>,
}

pub fn describe() -> Vec<CategoryView> {
    TAXONOMY
        .iter()
        .map(|c| CategoryView {
            name: c.name,
            skills: c
                .skills
                .iter()
                .map(|s| SkillView {
                    name: s.name,
                    definition: s.definition,
                })
                .collect(),
        })
        .collect()
}
