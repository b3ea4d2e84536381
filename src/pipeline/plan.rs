// file: src/pipeline/plan.rs
// description: maps a resolved directive onto the ordered list of stages to run
// reference: table-driven stage selection

use crate::models::{Directive, SecondaryFilter, Stage};
use crate::pipeline::directive::Resolution;
use serde::Serialize;
use std::ops::RangeInclusive;

const LAST_POSITION: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StagePlan {
    directive: Directive,
    stages: Vec<Stage>,
}

impl StagePlan {
    pub fn build(directive: Directive, secondary: SecondaryFilter) -> Self {
        let stages = Self::span(directive)
            .map(|position| Self::stage_at(position, secondary))
            .collect();

        Self { directive, stages }
    }

    pub fn from_resolution(resolution: Resolution) -> Self {
        Self::build(resolution.directive, resolution.secondary)
    }

    /// `all` is the whole pipeline for `upto` and `only`; `-from all` is
    /// shape comparison alone, the same as `-from rocs`.
    fn span(directive: Directive) -> RangeInclusive<usize> {
        let Some(position) = directive.stage_name().position() else {
            return match directive {
                Directive::From(_) => LAST_POSITION..=LAST_POSITION,
                _ => 0..=LAST_POSITION,
            };
        };

        match directive {
            Directive::Upto(_) => 0..=position,
            Directive::Only(_) => position..=position,
            Directive::From(_) => position..=LAST_POSITION,
        }
    }

    fn stage_at(position: usize, secondary: SecondaryFilter) -> Stage {
        match position {
            0 => Stage::BasicFilter,
            1 => Stage::SecondaryFilter(secondary),
            2 => Stage::ConformerGeneration,
            _ => Stage::ShapeComparison,
        }
    }

    pub fn directive(&self) -> Directive {
        self.directive
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    pub fn contains(&self, stage: Stage) -> bool {
        self.stages.contains(&stage)
    }

    pub fn reaches_shape_comparison(&self) -> bool {
        self.contains(Stage::ShapeComparison)
    }

    pub fn runs_basic_filter(&self) -> bool {
        self.contains(Stage::BasicFilter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StageName;
    use pretty_assertions::assert_eq;

    const PAINS: Stage = Stage::SecondaryFilter(SecondaryFilter::Pains);
    const BLOCKBUSTER: Stage = Stage::SecondaryFilter(SecondaryFilter::Blockbuster);

    fn stages(directive: Directive, secondary: SecondaryFilter) -> Vec<Stage> {
        StagePlan::build(directive, secondary).stages().to_vec()
    }

    #[test]
    fn test_upto_table() {
        use Stage::*;
        let p = crate::models::SecondaryFilter::Pains;

        assert_eq!(stages(Directive::Upto(StageName::Basic), p), vec![BasicFilter]);
        assert_eq!(stages(Directive::Upto(StageName::Pains), p), vec![BasicFilter, PAINS]);
        assert_eq!(
            stages(Directive::Upto(StageName::Blockbuster), crate::models::SecondaryFilter::Blockbuster),
            vec![BasicFilter, BLOCKBUSTER]
        );
        assert_eq!(
            stages(Directive::Upto(StageName::Oeomega), p),
            vec![BasicFilter, PAINS, ConformerGeneration]
        );
        assert_eq!(
            stages(Directive::Upto(StageName::Rocs), p),
            vec![BasicFilter, PAINS, ConformerGeneration, ShapeComparison]
        );
        assert_eq!(
            stages(Directive::Upto(StageName::All), p),
            vec![BasicFilter, PAINS, ConformerGeneration, ShapeComparison]
        );
    }

    #[test]
    fn test_only_table() {
        use Stage::*;
        let p = crate::models::SecondaryFilter::Pains;

        assert_eq!(stages(Directive::Only(StageName::Basic), p), vec![BasicFilter]);
        assert_eq!(
            stages(Directive::Only(StageName::Pains), crate::models::SecondaryFilter::Blockbuster),
            vec![BLOCKBUSTER]
        );
        assert_eq!(stages(Directive::Only(StageName::Oeomega), p), vec![ConformerGeneration]);
        assert_eq!(stages(Directive::Only(StageName::Rocs), p), vec![ShapeComparison]);
        assert_eq!(
            stages(Directive::Only(StageName::All), p),
            vec![BasicFilter, PAINS, ConformerGeneration, ShapeComparison]
        );
    }

    #[test]
    fn test_from_table() {
        use Stage::*;
        let p = crate::models::SecondaryFilter::Pains;

        assert_eq!(
            stages(Directive::From(StageName::Basic), p),
            vec![BasicFilter, PAINS, ConformerGeneration, ShapeComparison]
        );
        assert_eq!(
            stages(Directive::From(StageName::Pains), p),
            vec![PAINS, ConformerGeneration, ShapeComparison]
        );
        assert_eq!(
            stages(Directive::From(StageName::Oeomega), p),
            vec![ConformerGeneration, ShapeComparison]
        );
        assert_eq!(stages(Directive::From(StageName::Rocs), p), vec![ShapeComparison]);
        assert_eq!(stages(Directive::From(StageName::All), p), vec![ShapeComparison]);
    }

    #[test]
    fn test_plan_queries() {
        let plan = StagePlan::build(Directive::Upto(StageName::Oeomega), crate::models::SecondaryFilter::Pains);
        assert!(plan.runs_basic_filter());
        assert!(!plan.reaches_shape_comparison());

        let plan = StagePlan::build(Directive::Only(StageName::Pains), crate::models::SecondaryFilter::Pains);
        assert!(!plan.runs_basic_filter());
        assert_eq!(plan.directive(), Directive::Only(StageName::Pains));
    }
}
