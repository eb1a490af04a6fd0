//! Parameter binder: fills `defVal` of recognised slots in `params_data`.
//!
//! Rules are evaluated per parameter, first match wins:
//! 1. client-identifier slot (`type == "text"`, `opName == marker`)
//! 2. report-specific rule table ([`rules`])
//! 3. date slots (`opOrigin` selects `dateFrom`, `dateTo`, or today)
//!
//! Everything else passes through untouched, including unknown fields and
//! key order.

pub mod rules;

use chrono::NaiveDate;
use serde_json::{Map, Value};

use crate::config::BindingConfig;
use crate::constants::DATE_FORMAT;
use crate::models::ReportRequest;

use rules::{BindingSource, ReportRule, SlotMatcher, str_field};

/// Name of the parameter list inside a template.
pub const PARAMS_FIELD: &str = "params_data";

/// Values available to the binder for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bindings {
    pub id: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub invoice_number: Option<String>,
    /// Today's date, already formatted. Computed once per request.
    pub today: String,
}

impl Bindings {
    /// Build bindings from a request, pinning "today" to `today`.
    pub fn from_request(request: &ReportRequest, today: NaiveDate) -> Self {
        Self {
            id: request.client_number.clone(),
            date_from: request.date_from.clone(),
            date_to: request.date_to.clone(),
            invoice_number: request.invoice_number.clone(),
            today: format_date(today),
        }
    }
}

/// Format a date for template slots and display (`MM/DD/YYYY`).
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Today's date in the service's local time zone.
pub fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Applies the binding rules to templates.
#[derive(Debug, Clone)]
pub struct Binder {
    client_slot: SlotMatcher,
    report_rules: Vec<ReportRule>,
}

impl Binder {
    /// Build a binder with the built-in rule table.
    pub fn new(config: &BindingConfig) -> Self {
        Self {
            client_slot: SlotMatcher {
                param_type: "text".to_string(),
                op_name: Some(config.client_marker.clone()),
                name_contains: None,
            },
            report_rules: rules::default_rules(config),
        }
    }

    /// Append a report-specific rule; later rows lose to earlier ones.
    pub fn with_rule(mut self, rule: ReportRule) -> Self {
        self.report_rules.push(rule);
        self
    }

    /// Whether any parameter of `template` is a client-identifier slot.
    pub fn needs_client_id(&self, template: &Value) -> bool {
        params(template)
            .iter()
            .filter_map(Value::as_object)
            .any(|param| self.client_slot.matches(param))
    }

    /// Return a copy of `template` with every recognised slot filled.
    ///
    /// Templates without a `params_data` array come back unchanged.
    pub fn bind(&self, template: &Value, report_type: &str, bindings: &Bindings) -> Value {
        let mut filled = template.clone();
        let Some(list) = filled.get_mut(PARAMS_FIELD).and_then(Value::as_array_mut) else {
            return filled;
        };

        for param in list.iter_mut().filter_map(Value::as_object_mut) {
            if let Some(value) = self.resolve(param, report_type, bindings) {
                param.insert("defVal".to_string(), Value::String(value.to_string()));
            }
        }

        filled
    }

    /// Pick the value for one slot, or `None` to leave it unchanged.
    fn resolve<'a>(
        &self,
        param: &Map<String, Value>,
        report_type: &str,
        bindings: &'a Bindings,
    ) -> Option<&'a str> {
        if self.client_slot.matches(param) {
            return BindingSource::ClientId.value(bindings);
        }

        if let Some(value) = self
            .report_rules
            .iter()
            .find_map(|rule| rule.applies(report_type, param, bindings))
        {
            return Some(value);
        }

        if str_field(param, "type") == Some("date") {
            let source = match str_field(param, "opOrigin") {
                Some("from") => BindingSource::DateFrom,
                Some("to") => BindingSource::DateTo,
                _ => BindingSource::Today,
            };
            return Some(source.value(bindings).unwrap_or(bindings.today.as_str()));
        }

        None
    }
}

fn params(template: &Value) -> &[Value] {
    template
        .get(PARAMS_FIELD)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}
