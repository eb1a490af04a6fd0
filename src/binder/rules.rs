//! Report-specific binding rules.
//!
//! Each entry pairs a report type with a slot predicate and the request value
//! it fills. New report quirks are added as table rows, not as branches in
//! the binder.

use serde_json::{Map, Value};

use super::Bindings;
use crate::config::BindingConfig;

/// Which bound value a rule writes into `defVal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingSource {
    ClientId,
    InvoiceNumber,
    DateFrom,
    DateTo,
    Today,
}

impl BindingSource {
    /// The bound value, or `None` when the request did not supply it.
    pub fn value<'a>(&self, bindings: &'a Bindings) -> Option<&'a str> {
        match self {
            BindingSource::ClientId => bindings.id.as_deref(),
            BindingSource::InvoiceNumber => bindings.invoice_number.as_deref(),
            BindingSource::DateFrom => bindings.date_from.as_deref(),
            BindingSource::DateTo => bindings.date_to.as_deref(),
            BindingSource::Today => Some(bindings.today.as_str()),
        }
    }
}

/// Predicate over a single parameter slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotMatcher {
    /// Required `type`.
    pub param_type: String,
    /// Required exact `opName`, if any.
    pub op_name: Option<String>,
    /// Required substring of `name`, if any.
    pub name_contains: Option<String>,
}

impl SlotMatcher {
    pub fn matches(&self, param: &Map<String, Value>) -> bool {
        if str_field(param, "type") != Some(self.param_type.as_str()) {
            return false;
        }
        if let Some(ref op_name) = self.op_name {
            if str_field(param, "opName") != Some(op_name.as_str()) {
                return false;
            }
        }
        if let Some(ref label) = self.name_contains {
            if !str_field(param, "name").is_some_and(|name| name.contains(label.as_str())) {
                return false;
            }
        }
        true
    }
}

/// One row of the report-specific rule table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRule {
    pub report_type: String,
    pub matcher: SlotMatcher,
    pub source: BindingSource,
}

impl ReportRule {
    /// Whether this rule fills `param` for `report_type` with the given bindings.
    ///
    /// A rule whose source value is absent does not apply, so the slot falls
    /// through to the generic rules.
    pub fn applies<'a>(
        &self,
        report_type: &str,
        param: &Map<String, Value>,
        bindings: &'a Bindings,
    ) -> Option<&'a str> {
        if self.report_type != report_type || !self.matcher.matches(param) {
            return None;
        }
        self.source.value(bindings)
    }
}

/// The built-in rule table.
pub fn default_rules(config: &BindingConfig) -> Vec<ReportRule> {
    vec![ReportRule {
        report_type: config.invoice_report.clone(),
        matcher: SlotMatcher {
            param_type: "numeric-long".to_string(),
            op_name: None,
            name_contains: Some(config.document_number_label.clone()),
        },
        source: BindingSource::InvoiceNumber,
    }]
}

/// Read a string field from a parameter object.
pub(crate) fn str_field<'a>(param: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    param.get(key).and_then(Value::as_str)
}
