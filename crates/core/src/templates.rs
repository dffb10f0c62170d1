// crates/core/src/templates.rs
//! Built-in prompt templates.
//!
//! Templates use `[VARIABLE]` placeholders. Lookups by name fail with
//! [`TemplateError::NotFound`], which lists every valid name.

use serde::Serialize;

use crate::error::TemplateError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromptTemplate {
    pub name: &'static str,
    pub category: &'static str,
    pub description: &'static str,
    pub template: &'static str,
    pub variables: &'static [&'static str],
    pub example: &'static str,
    pub tags: &'static [&'static str],
    pub success_metrics: &'static str,
}

pub static TEMPLATES: &[PromptTemplate] = &[
    PromptTemplate {
        name: "feature_implementation",
        category: "feature",
        description: "Add a feature to a specific file or component with explicit constraints.",
        template: "In [FILE], implement [FEATURE].\n\
                   Current behavior: [CURRENT]\n\
                   Requirements:\n- [REQUIREMENT]\n\
                   Constraints: [CONSTRAINTS]\n\
                   Follow the style of [REFERENCE].",
        variables: &["FILE", "FEATURE", "CURRENT", "REQUIREMENT", "CONSTRAINTS", "REFERENCE"],
        example: "In src/components/LoginForm.tsx, implement password validation.\n\
                  Current behavior: any password is accepted\n\
                  Requirements:\n- at least 8 characters, one digit\n\
                  Constraints: no new dependencies\n\
                  Follow the style of SignupForm.tsx.",
        tags: &["feature", "implementation", "react", "component"],
        success_metrics: "Working code on the first answer; few follow-up messages.",
    },
    PromptTemplate {
        name: "bug_fix_with_error",
        category: "bug_fix",
        description: "Report a bug with the exact error, location, and expected behavior.",
        template: "[FILE] fails with this error:\n[ERROR]\n\
                   Steps to reproduce: [STEPS]\n\
                   Expected behavior: [EXPECTED]\n\
                   Find the cause and fix it.",
        variables: &["FILE", "ERROR", "STEPS", "EXPECTED"],
        example: "src/api/payment.ts fails with this error:\n\
                  TypeError: Cannot read properties of undefined (reading 'amount')\n\
                  Steps to reproduce: click Pay with an empty cart\n\
                  Expected behavior: show an empty-cart message\n\
                  Find the cause and fix it.",
        tags: &["bug", "debugging", "error"],
        success_metrics: "Root cause identified without guessing; fix touches only the failing path.",
    },
    PromptTemplate {
        name: "code_review",
        category: "code_review",
        description: "Ask for a focused review of a file or change.",
        template: "Review [FILE] for [FOCUS].\n\
                   Context: [CONTEXT]\n\
                   List concrete issues with line references and suggested fixes.",
        variables: &["FILE", "FOCUS", "CONTEXT"],
        example: "Review src/auth/session.rs for concurrency bugs.\n\
                  Context: sessions are shared across request handlers\n\
                  List concrete issues with line references and suggested fixes.",
        tags: &["review", "quality"],
        success_metrics: "Actionable findings tied to specific lines.",
    },
    PromptTemplate {
        name: "test_writing",
        category: "testing",
        description: "Generate tests for a unit with named cases and framework.",
        template: "Write [FRAMEWORK] tests for [TARGET] in [FILE].\n\
                   Cover: [CASES]\n\
                   Use the existing fixtures in [FIXTURES].",
        variables: &["FRAMEWORK", "TARGET", "FILE", "CASES", "FIXTURES"],
        example: "Write pytest tests for parse_invoice in billing/parser.py.\n\
                  Cover: empty input, missing currency, negative totals\n\
                  Use the existing fixtures in tests/conftest.py.",
        tags: &["test", "testing", "coverage"],
        success_metrics: "Tests run green on the first try and cover every listed case.",
    },
    PromptTemplate {
        name: "refactoring",
        category: "refactoring",
        description: "Restructure code without changing behavior.",
        template: "Refactor [TARGET] in [FILE] to [GOAL].\n\
                   Keep the public API unchanged.\n\
                   Do not change: [KEEP]",
        variables: &["TARGET", "FILE", "GOAL", "KEEP"],
        example: "Refactor OrderService in src/services/order.ts to split validation from persistence.\n\
                  Keep the public API unchanged.\n\
                  Do not change: the database schema",
        tags: &["refactor", "cleanup"],
        success_metrics: "Behavior unchanged; existing tests still pass.",
    },
    PromptTemplate {
        name: "api_endpoint",
        category: "feature",
        description: "Add an HTTP endpoint with request and response shapes.",
        template: "Add a [METHOD] [PATH] endpoint in [FILE].\n\
                   Request: [REQUEST]\n\
                   Response: [RESPONSE]\n\
                   Errors: [ERRORS]",
        variables: &["METHOD", "PATH", "FILE", "REQUEST", "RESPONSE", "ERRORS"],
        example: "Add a POST /api/orders endpoint in src/routes/orders.py.\n\
                  Request: {\"items\": [{\"sku\": str, \"qty\": int}]}\n\
                  Response: 201 with the created order\n\
                  Errors: 400 on empty items, 409 on out-of-stock",
        tags: &["api", "rest", "backend"],
        success_metrics: "Endpoint matches the contract including error statuses.",
    },
    PromptTemplate {
        name: "documentation",
        category: "docs",
        description: "Write or update documentation for a module.",
        template: "Write [DOC_TYPE] for [TARGET].\n\
                   Audience: [AUDIENCE]\n\
                   Include: [SECTIONS]",
        variables: &["DOC_TYPE", "TARGET", "AUDIENCE", "SECTIONS"],
        example: "Write a README section for the import command.\n\
                  Audience: new contributors\n\
                  Include: usage, flags, troubleshooting",
        tags: &["docs", "readme", "documentation"],
        success_metrics: "Document answers the audience's first questions without follow-up.",
    },
    PromptTemplate {
        name: "jira_ticket_creation",
        category: "workflow",
        description: "Turn a finding into a ticket with summary, context, and acceptance criteria.",
        template: "Create a Jira ticket for [ISSUE].\n\
                   Project: [PROJECT]\n\
                   Context: [CONTEXT]\n\
                   Acceptance criteria:\n- [CRITERIA]",
        variables: &["ISSUE", "PROJECT", "CONTEXT", "CRITERIA"],
        example: "Create a Jira ticket for slow dashboard loading.\n\
                  Project: FRONT\n\
                  Context: p95 load time is 4s since the charts refactor\n\
                  Acceptance criteria:\n- p95 under 1.5s",
        tags: &["jira", "ticket", "workflow"],
        success_metrics: "Ticket is ready to pick up without clarification.",
    },
];

/// Lookup and search over the built-in templates.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateLibrary;

impl TemplateLibrary {
    pub fn all(&self) -> &'static [PromptTemplate] {
        TEMPLATES
    }

    pub fn names(&self) -> Vec<&'static str> {
        TEMPLATES.iter().map(|t| t.name).collect()
    }

    pub fn get(&self, name: &str) -> Result<&'static PromptTemplate, TemplateError> {
        TEMPLATES
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| TemplateError::NotFound {
                name: name.to_string(),
                available: self.names().into_iter().map(String::from).collect(),
            })
    }

    /// Templates whose category equals `category` (case-insensitive).
    pub fn by_category(&self, category: &str) -> Vec<&'static PromptTemplate> {
        TEMPLATES
            .iter()
            .filter(|t| t.category.eq_ignore_ascii_case(category))
            .collect()
    }

    /// Case-insensitive search over name, description and tags.
    pub fn search(&self, query: &str) -> Vec<&'static PromptTemplate> {
        let q = query.to_lowercase();
        TEMPLATES
            .iter()
            .filter(|t| {
                t.name.to_lowercase().contains(&q)
                    || t.description.to_lowercase().contains(&q)
                    || t.tags.iter().any(|tag| tag.to_lowercase().contains(&q))
            })
            .collect()
    }

    /// Substitute `[VARIABLE]` placeholders; unknown placeholders stay.
    pub fn render(&self, name: &str, vars: &[(&str, &str)]) -> Result<String, TemplateError> {
        let template = self.get(name)?;
        let mut result = template.template.to_string();
        for (key, value) in vars {
            result = result.replace(&format!("[{key}]"), value);
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_unique() {
        let mut names = TemplateLibrary.names();
        let before = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(before, names.len());
    }

    #[test]
    fn test_variables_appear_in_template() {
        for t in TEMPLATES {
            for var in t.variables {
                assert!(
                    t.template.contains(&format!("[{var}]")),
                    "{} missing [{}]",
                    t.name,
                    var
                );
            }
        }
    }

    #[test]
    fn test_get_unknown_lists_names() {
        let err = TemplateLibrary.get("nope").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("nope"));
        assert!(msg.contains("jira_ticket_creation"));
        assert!(msg.contains("bug_fix_with_error"));
    }

    #[test]
    fn test_by_category_and_search() {
        let lib = TemplateLibrary;
        let features = lib.by_category("FEATURE");
        assert_eq!(features.len(), 2);
        assert!(lib.by_category("nonexistent").is_empty());

        let jira: Vec<_> = lib.search("JIRA").iter().map(|t| t.name).collect();
        assert_eq!(jira, vec!["jira_ticket_creation"]);
    }

    #[test]
    fn test_render() {
        let out = TemplateLibrary
            .render("code_review", &[("FILE", "src/lib.rs"), ("FOCUS", "panics")])
            .unwrap();
        assert!(out.starts_with("Review src/lib.rs for panics."));
        assert!(out.contains("[CONTEXT]"));
        assert!(TemplateLibrary.render("missing", &[]).is_err());
    }
}
