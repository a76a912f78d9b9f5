//! Operation registry
//!
//! Built once from static descriptor tables. Every descriptor is validated
//! at construction, so a bad table is rejected at startup rather than on
//! first use.

use crate::descriptor::{OperationDescriptor, ServiceDescriptor};
use crate::error::{CoreError, Result};
use std::collections::HashSet;
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct Registry {
    operations: Vec<&'static OperationDescriptor>,
}

impl Registry {
    pub fn new<I>(operations: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'static OperationDescriptor>,
    {
        let operations: Vec<_> = operations.into_iter().collect();
        let mut seen = HashSet::new();

        for op in &operations {
            op.validate()?;
            let key = (
                op.service.name.to_ascii_lowercase(),
                op.name.to_ascii_lowercase(),
            );
            if !seen.insert(key) {
                return Err(CoreError::InvalidDescriptor {
                    operation: op.qualified_name(),
                    reason: "operation registered twice".to_string(),
                });
            }
        }

        debug!(operations = operations.len(), "operation registry built");
        Ok(Self { operations })
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn operations(&self) -> impl Iterator<Item = &'static OperationDescriptor> + '_ {
        self.operations.iter().copied()
    }

    /// Operations of a single service (matched case-insensitively)
    pub fn for_service<'a>(
        &'a self,
        service: &'a str,
    ) -> impl Iterator<Item = &'static OperationDescriptor> + 'a {
        self.operations()
            .filter(move |op| op.service.name.eq_ignore_ascii_case(service))
    }

    /// Distinct services in registration order
    pub fn services(&self) -> Vec<&'static ServiceDescriptor> {
        let mut services: Vec<&'static ServiceDescriptor> = Vec::new();
        for op in &self.operations {
            if !services.iter().any(|s| s.name == op.service.name) {
                services.push(op.service);
            }
        }
        services
    }

    /// Resolve `service:Operation`, or a bare operation name when unambiguous
    pub fn lookup(&self, name: &str) -> Result<&'static OperationDescriptor> {
        let name = name.trim();
        let unknown = || CoreError::UnknownOperation {
            name: name.to_string(),
        };

        if let Some((service, operation)) = name.split_once(':') {
            return self
                .for_service(service)
                .find(|op| op.name.eq_ignore_ascii_case(operation))
                .ok_or_else(unknown);
        }

        let matches: Vec<_> = self
            .operations()
            .filter(|op| op.name.eq_ignore_ascii_case(name))
            .collect();

        match matches.as_slice() {
            [] => Err(unknown()),
            [op] => Ok(*op),
            many => Err(CoreError::AmbiguousOperation {
                name: name.to_string(),
                candidates: many
                    .iter()
                    .map(|op| op.qualified_name())
                    .collect::<Vec<_>>()
                    .join(", "),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{FieldKind, OutputField, ParamSpec, Protocol};

    static ALPHA: ServiceDescriptor = ServiceDescriptor {
        name: "alpha",
        title: "Alpha",
        signing_name: "alpha",
        endpoint_prefix: "alpha",
        protocol: Protocol::RestJson1,
    };

    static BETA: ServiceDescriptor = ServiceDescriptor {
        name: "beta",
        title: "Beta",
        signing_name: "beta",
        endpoint_prefix: "beta",
        protocol: Protocol::RestJson1,
    };

    const TAG_PARAMS: &[ParamSpec] = &[ParamSpec::string("ResourceArn", "resourceArn").required()];

    static ALPHA_TAG: OperationDescriptor = OperationDescriptor {
        service: &ALPHA,
        name: "TagResource",
        default_selector: "*",
        pagination: None,
        params: TAG_PARAMS,
        outputs: &[],
    };

    static BETA_TAG: OperationDescriptor = OperationDescriptor {
        service: &BETA,
        name: "TagResource",
        default_selector: "*",
        pagination: None,
        params: TAG_PARAMS,
        outputs: &[],
    };

    static BETA_GET: OperationDescriptor = OperationDescriptor {
        service: &BETA,
        name: "GetThing",
        default_selector: "Thing",
        pagination: None,
        params: &[],
        outputs: &[OutputField::new("Thing", "thing", FieldKind::Structure)],
    };

    static BAD_SELECTOR: OperationDescriptor = OperationDescriptor {
        service: &BETA,
        name: "Broken",
        default_selector: "Missing",
        pagination: None,
        params: &[],
        outputs: &[],
    };

    #[test]
    fn test_lookup() {
        let registry = Registry::new([&ALPHA_TAG, &BETA_TAG, &BETA_GET]).unwrap();
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.lookup("getthing").unwrap().name, "GetThing");
        assert_eq!(
            registry.lookup("alpha:TagResource").unwrap().qualified_name(),
            "alpha:TagResource"
        );
        assert_eq!(registry.services().len(), 2);
        assert_eq!(registry.for_service("BETA").count(), 2);
    }

    #[test]
    fn test_ambiguous_and_unknown() {
        let registry = Registry::new([&ALPHA_TAG, &BETA_TAG]).unwrap();
        let err = registry.lookup("TagResource").unwrap_err();
        assert_eq!(err.error_code(), "AmbiguousOperation");
        assert!(err.to_string().contains("alpha:TagResource"));
        assert!(err.to_string().contains("beta:TagResource"));

        let err = registry.lookup("alpha:GetThing").unwrap_err();
        assert_eq!(err.error_code(), "UnknownOperation");
    }

    #[test]
    fn test_invalid_default_selector_rejected_at_construction() {
        let err = Registry::new([&BAD_SELECTOR]).unwrap_err();
        assert_eq!(err.error_code(), "InvalidDescriptor");
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let err = Registry::new([&ALPHA_TAG, &ALPHA_TAG]).unwrap_err();
        assert!(err.to_string().contains("registered twice"));
    }
}
