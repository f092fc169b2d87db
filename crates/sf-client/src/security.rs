//! Escaping helpers for values spliced into SOQL and SOAP bodies.
//!
//! Every user- or org-provided value that ends up inside a query string or
//! an XML envelope goes through one of these functions.
//!
//! ```rust
//! use sf_inventory_client::security::{soql, xml};
//!
//! let name = soql::escape_string("O'Brien__c");
//! let query = format!("SELECT DurableId FROM EntityDefinition WHERE QualifiedApiName = '{}'", name);
//! assert!(query.contains("O\\'Brien__c"));
//!
//! assert_eq!(xml::escape("Reports & Dashboards"), "Reports &amp; Dashboards");
//! ```

/// SOQL escaping utilities.
pub mod soql {
    /// Escape a string value for use inside a single-quoted SOQL literal.
    ///
    /// - Single quotes (`'`) are escaped to (`\'`)
    /// - Backslashes (`\`) are escaped to (`\\`)
    /// - Newlines, carriage returns and tabs are escaped to `\n`, `\r`, `\t`
    #[must_use]
    pub fn escape_string(value: &str) -> String {
        let mut escaped = String::with_capacity(value.len() + 16);
        for ch in value.chars() {
            match ch {
                '\'' => escaped.push_str("\\'"),
                '\\' => escaped.push_str("\\\\"),
                '\n' => escaped.push_str("\\n"),
                '\r' => escaped.push_str("\\r"),
                '\t' => escaped.push_str("\\t"),
                _ => escaped.push(ch),
            }
        }
        escaped
    }

    /// Validate that a name is a plain API name: a letter followed by
    /// ASCII alphanumerics or underscores.
    #[must_use]
    pub fn is_safe_sobject_name(name: &str) -> bool {
        let mut chars = name.chars();
        match chars.next() {
            Some(first) if first.is_ascii_alphabetic() => {
                chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
            }
            _ => false,
        }
    }
}

/// XML escaping utilities for SOAP/Metadata API.
pub mod xml {
    /// Escape a string for safe inclusion in XML content.
    ///
    /// This escapes the five predefined XML entities.
    #[must_use]
    pub fn escape(value: &str) -> String {
        let mut escaped = String::with_capacity(value.len() + 16);
        for ch in value.chars() {
            match ch {
                '&' => escaped.push_str("&amp;"),
                '<' => escaped.push_str("&lt;"),
                '>' => escaped.push_str("&gt;"),
                '"' => escaped.push_str("&quot;"),
                '\'' => escaped.push_str("&apos;"),
                _ => escaped.push(ch),
            }
        }
        escaped
    }

    /// Reverse [`escape`] for element text read back from a response.
    #[must_use]
    pub fn unescape(value: &str) -> String {
        if !value.contains('&') {
            return value.to_string();
        }
        value
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&apos;", "'")
            .replace("&amp;", "&")
    }
}
