// file: src/pipeline/directive.rs
// description: resolves the effective -upto/-only/-from selector and secondary filter kind
// reference: directive precedence follows the legacy branch order upto > only > from

use crate::error::{PipelineError, Result};
use crate::models::{Directive, PipelineRequest, SecondaryFilter, StageName};
use tracing::{debug, warn};

pub const USAGE: &str = "oe_pipeline -in INFILE -upto|-only|-from [basic|pains|blockbuster|oeomega|rocs|all] \
-filter FILTERFILE [optional] -mpi_np CORES [optional: default 8] -query QUERYFILE [required for rocs]";

/// Outcome of directive resolution: which selector wins and which preset the
/// secondary filter stage runs with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub directive: Directive,
    pub secondary: SecondaryFilter,
}

pub struct DirectiveResolver;

impl DirectiveResolver {
    /// `Ok(None)` means no selector was given and there is nothing to run.
    pub fn resolve(request: &PipelineRequest) -> Result<Option<Resolution>> {
        if request.supplied_count() < 2 {
            return Err(PipelineError::Usage(format!(
                "Please enter the correct number of arguments. Usage: {}",
                USAGE
            )));
        }

        let candidates = [
            request.upto.map(Directive::Upto),
            request.only.map(Directive::Only),
            request.from.map(Directive::From),
        ];
        let mut given = candidates.into_iter().flatten();

        let Some(directive) = given.next() else {
            debug!("No -upto/-only/-from directive supplied");
            return Ok(None);
        };

        let ignored: Vec<String> = given.map(|d| d.to_string()).collect();
        if !ignored.is_empty() {
            warn!(
                "Directives are mutually exclusive; using {} and ignoring {}",
                directive,
                ignored.join(", ")
            );
        }

        let secondary = Self::secondary_filter(directive, request.filter.as_deref())?;

        Ok(Some(Resolution {
            directive,
            secondary,
        }))
    }

    fn secondary_filter(directive: Directive, filter: Option<&str>) -> Result<SecondaryFilter> {
        let preset = filter.and_then(SecondaryFilter::from_preset);

        match directive {
            Directive::Only(name) if name.is_secondary_filter() => preset.ok_or_else(|| {
                PipelineError::FilterSelection(format!(
                    "-only {} needs an explicit preset. Please use -filter pains/blockbuster",
                    name
                ))
            }),
            _ => Ok(preset.unwrap_or_default()),
        }
    }
}

pub fn is_known_filter_kind(value: &str) -> bool {
    value == StageName::Basic.as_str() || SecondaryFilter::from_preset(value).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(request: PipelineRequest) -> Result<Option<Resolution>> {
        DirectiveResolver::resolve(&request)
    }

    #[test]
    fn test_single_directive_is_usage_error() {
        let request = PipelineRequest {
            upto: Some(StageName::Basic),
            ..PipelineRequest::default()
        };
        let err = resolve(request).unwrap_err();
        assert!(matches!(err, PipelineError::Usage(_)));
    }

    #[test]
    fn test_no_selector_is_noop() {
        let request = PipelineRequest::new("mols.smi").with_mpi_np(4);
        assert_eq!(resolve(request).unwrap(), None);
    }

    #[test]
    fn test_only_secondary_requires_filter() {
        let request = PipelineRequest::new("mols.smi").only(StageName::Pains);
        let err = resolve(request).unwrap_err();
        assert!(matches!(err, PipelineError::FilterSelection(_)));

        let request = PipelineRequest::new("mols.smi")
            .only(StageName::Blockbuster)
            .with_filter("custom.txt");
        assert!(resolve(request).is_err());
    }

    #[test]
    fn test_only_secondary_uses_filter_value() {
        let request = PipelineRequest::new("mols.smi")
            .only(StageName::Pains)
            .with_filter("blockbuster");
        let resolution = resolve(request).unwrap().unwrap();
        assert_eq!(resolution.secondary, SecondaryFilter::Blockbuster);
    }

    #[test]
    fn test_from_and_upto_default_to_pains() {
        let request = PipelineRequest::new("mols.smi").from_stage(StageName::Blockbuster);
        let resolution = resolve(request).unwrap().unwrap();
        assert_eq!(resolution.secondary, SecondaryFilter::Pains);

        let request = PipelineRequest::new("mols.smi")
            .upto(StageName::Oeomega)
            .with_filter("blockbuster");
        let resolution = resolve(request).unwrap().unwrap();
        assert_eq!(resolution.secondary, SecondaryFilter::Blockbuster);
    }

    #[test]
    fn test_precedence_upto_only_from() {
        let request = PipelineRequest::new("mols.smi")
            .from_stage(StageName::Rocs)
            .only(StageName::Oeomega)
            .upto(StageName::Basic);
        let resolution = resolve(request).unwrap().unwrap();
        assert_eq!(resolution.directive, Directive::Upto(StageName::Basic));

        let request = PipelineRequest::new("mols.smi")
            .from_stage(StageName::Rocs)
            .only(StageName::Oeomega);
        let resolution = resolve(request).unwrap().unwrap();
        assert_eq!(resolution.directive, Directive::Only(StageName::Oeomega));
    }

    #[test]
    fn test_known_filter_kinds() {
        assert!(is_known_filter_kind("basic"));
        assert!(is_known_filter_kind("pains"));
        assert!(is_known_filter_kind("blockbuster"));
        assert!(!is_known_filter_kind("mine.txt"));
    }
}
