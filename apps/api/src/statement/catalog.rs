//! Static reference data shared by the intake form and the categorizer.
//!
//! Example strings must match the intake form's option text exactly: the
//! categorizer compares with plain string equality, so a stray character on
//! either side silently moves an adjustment into "Other".

use serde::Serialize;

/// One governing category and the adjustments filed under it.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AdjustmentCategory {
    pub name: &'static str,
    pub examples: &'static [&'static str],
}

/// Ordered set of adjustment categories.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AdjustmentCatalog {
    pub categories: &'static [AdjustmentCategory],
}

impl AdjustmentCatalog {
    /// First category (in catalog order) whose examples contain `item` exactly.
    pub fn category_of(&self, item: &str) -> Option<&'static str> {
        self.categories
            .iter()
            .find(|c| c.examples.contains(&item))
            .map(|c| c.name)
    }

    pub fn contains(&self, item: &str) -> bool {
        self.category_of(item).is_some()
    }
}

pub static ADJUSTMENT_CATALOG: AdjustmentCatalog = AdjustmentCatalog {
    categories: &[
        AdjustmentCategory {
            name: "Environmental",
            examples: &[
                "Quiet workspace or access to noise-cancelling headphones",
                "Adjusted lighting (reduced fluorescent, natural light preferred)",
                "Designated low-stimulus area for focused work",
                "Flexible seating arrangements",
                "Reduced visual clutter in workspace",
            ],
        },
        AdjustmentCategory {
            name: "Communication & Meetings",
            examples: &[
                "Agendas provided at least 24 hours before meetings",
                "Written summaries / minutes after verbal discussions",
                "Option to contribute via written rather than verbal format",
                "Reduced meeting frequency or shorter meeting durations",
                "One-to-one check-ins preferred over group settings",
            ],
        },
        AdjustmentCategory {
            name: "Task & Workload Management",
            examples: &[
                "Clear, written task instructions with explicit deadlines",
                "Tasks broken into smaller, manageable steps",
                "Priority lists or task boards (e.g. Kanban)",
                "Extended deadlines where processing speed is a factor",
                "Reduced multitasking expectations",
            ],
        },
        AdjustmentCategory {
            name: "Technology & Tools",
            examples: &[
                "Text-to-speech or speech-to-text software",
                "Mind-mapping or visual planning tools",
                "Screen reader or overlay software",
                "Dual monitors or increased screen size",
                "Access to recording devices for meetings/lectures",
            ],
        },
        AdjustmentCategory {
            name: "Working Patterns & Flexibility",
            examples: &[
                "Flexible start/end times to accommodate peak focus periods",
                "Regular scheduled breaks (e.g. Pomodoro technique)",
                "Option to work from home on sensory-overload days",
                "Phased return after periods of burnout or overwhelm",
                "Compressed hours to reduce commuting days",
            ],
        },
        AdjustmentCategory {
            name: "Training & Support",
            examples: &[
                "Neurodiversity awareness training for line managers",
                "Assigned mentor or workplace buddy",
                "Access to occupational therapy or coaching",
                "Regular structured review meetings with manager",
                "Reasonable time allowance for professional development",
            ],
        },
    ],
};

/// Literal option the form uses for an unlisted neurodivergence.
pub const OTHER_NEURODIVERGENCE: &str = "Other";

pub const NEURODIVERGENCE_OPTIONS: &[&str] = &[
    "ADHD (Attention Deficit Hyperactivity Disorder)",
    "Autism Spectrum Condition (ASC)",
    "Dyslexia",
    "Dyspraxia / Developmental Coordination Disorder (DCD)",
    "Dyscalculia",
    "Dysgraphia",
    "Tourette Syndrome",
    "Irlen Syndrome / Visual Stress",
    "Sensory Processing Differences",
    OTHER_NEURODIVERGENCE,
];

pub const ENVIRONMENT_OPTIONS: &[&str] = &[
    "Office-based",
    "Hybrid (Office + Remote)",
    "Fully Remote",
    "Field / Site-based",
    "Educational / Academic",
    "Clinical / Healthcare",
];

pub const CHALLENGE_AREAS: &[&str] = &[
    "Executive Function (planning, prioritising, time management)",
    "Working Memory (retaining/recalling information)",
    "Sensory Processing (noise, light, temperature sensitivity)",
    "Communication (verbal/written expression, social interaction)",
    "Emotional Regulation (stress, overwhelm, anxiety)",
    "Motor Skills (handwriting, coordination, fine motor tasks)",
    "Reading / Writing (processing speed, comprehension, spelling)",
    "Focus & Attention (sustained concentration, task switching)",
    "Organisation (workspace, paperwork, digital files)",
];
