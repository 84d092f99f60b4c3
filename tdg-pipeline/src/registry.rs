//! Compile-time step registry (§9 "Dynamic dispatch of pipeline steps → a
//! step registry"): replaces file-name discovery with a fixed array of
//! `{stepNum, name, run}` tuples the runner selects by index.

use tdg_core::errors::StepError;

use crate::context::RunContext;
use crate::steps;

pub struct StepDescriptor {
    pub number: usize,
    pub name: &'static str,
    pub run: fn(&RunContext) -> Result<(), StepError>,
}

pub static STEPS: [StepDescriptor; 8] = [
    StepDescriptor {
        number: 0,
        name: steps::step0_raw_materials::NAME,
        run: steps::step0_raw_materials::run,
    },
    StepDescriptor {
        number: 1,
        name: steps::step1_document_processing::NAME,
        run: steps::step1_document_processing::run,
    },
    StepDescriptor {
        number: 2,
        name: steps::step2_categories_balanced::NAME,
        run: steps::step2_categories_balanced::run,
    },
    StepDescriptor {
        number: 3,
        name: steps::step3_shortlex_validation::NAME,
        run: steps::step3_shortlex_validation::run,
    },
    StepDescriptor {
        number: 4,
        name: steps::step4_grades_statistics::NAME,
        run: steps::step4_grades_statistics::run,
    },
    StepDescriptor {
        number: 5,
        name: steps::step5_goal_alignment::NAME,
        run: steps::step5_goal_alignment::run,
    },
    StepDescriptor {
        number: 6,
        name: steps::step6_analysis_narratives::NAME,
        run: steps::step6_analysis_narratives::run,
    },
    StepDescriptor {
        number: 7,
        name: steps::step7_final_report::NAME,
        run: steps::step7_final_report::run,
    },
];
