use super::template::{
    Field, FieldKind, NumericRules, Section, Template, TemplateError, TemplateId, TextRules,
};

pub const STANDARD_TEMPLATE_ID: &str = "standard-business-plan";

/// Built-in template covering the sections every youth entrepreneurship plan needs.
pub fn standard_business_plan() -> Result<Template, TemplateError> {
    Template::new(
        TemplateId(STANDARD_TEMPLATE_ID.to_string()),
        "Standard Business Plan",
        standard_sections(),
    )
}

fn standard_sections() -> Vec<Section> {
    vec![
        Section::new(
            "executive_summary",
            "Executive Summary",
            vec![
                Field::new("business_name", FieldKind::text(bounded(2, 120)))
                    .labelled("Business name")
                    .required(),
                Field::new("executive_summary", FieldKind::textarea(bounded(50, 1500)))
                    .labelled("Executive summary")
                    .required(),
                Field::new("launch_date", FieldKind::Date).labelled("Planned launch date"),
            ],
        ),
        Section::new(
            "problem_solution",
            "Problem & Solution",
            vec![
                Field::new("problem_statement", FieldKind::textarea(bounded(50, 1200)))
                    .labelled("Problem statement")
                    .required(),
                Field::new("solution_description", FieldKind::textarea(bounded(50, 1500)))
                    .labelled("Proposed solution")
                    .required(),
                Field::new(
                    "business_stage",
                    FieldKind::Select {
                        options: options(&["idea", "prototype", "launched", "growing"]),
                    },
                )
                .labelled("Business stage")
                .required(),
            ],
        ),
        Section::new(
            "market",
            "Market Analysis",
            vec![
                Field::new("target_market", FieldKind::textarea(bounded(50, 1500)))
                    .labelled("Target market")
                    .required(),
                Field::new(
                    "customer_segments",
                    FieldKind::Multiselect {
                        options: options(&[
                            "students",
                            "young professionals",
                            "families",
                            "small businesses",
                            "public sector",
                            "tourists",
                        ]),
                    },
                )
                .labelled("Customer segments")
                .required(),
                Field::new("market_competitors", FieldKind::textarea(TextRules::default()))
                    .labelled("Main competitors"),
            ],
        ),
        Section::new(
            "team",
            "Team",
            vec![
                Field::new("team_size", FieldKind::number(NumericRules::at_least(1.0)))
                    .labelled("Team size")
                    .required(),
                Field::new("team_experience", FieldKind::textarea(TextRules::default()))
                    .labelled("Relevant experience"),
            ],
        ),
        Section::new(
            "financials",
            "Financial Plan",
            vec![
                Field::new(
                    "initial_investment",
                    FieldKind::currency(NumericRules::at_least(0.0)),
                )
                .labelled("Initial investment")
                .required(),
                Field::new(
                    "expected_revenue",
                    FieldKind::currency(NumericRules::at_least(0.0)),
                )
                .labelled("Expected first-year revenue")
                .required(),
                Field::new(
                    "financial_projection",
                    FieldKind::Table {
                        columns: options(&["year", "revenue", "costs", "profit"]),
                    },
                )
                .labelled("Financial projection")
                .required(),
                Field::new("revenue_chart", FieldKind::Chart).labelled("Revenue chart"),
            ],
        ),
    ]
}

fn bounded(min: usize, max: usize) -> TextRules {
    TextRules {
        min_length: Some(min),
        max_length: Some(max),
        pattern: None,
    }
}

fn options(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}
