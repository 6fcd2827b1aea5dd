//! Sample resumes for testing and demonstration.
//!
//! Each sample exercises a different part of the layout engine.

use crate::model::{Education, Experience, PersonalInfo, ResumeData};

/// A typical one-page resume with every section filled in.
pub fn sample_resume() -> ResumeData {
    ResumeData {
        personal_info: PersonalInfo {
            full_name: "Alex Morgan".into(),
            email: "alex.morgan@example.com".into(),
            phone: "+1 555 0142".into(),
            location: "Portland, OR".into(),
            linked_in_url: "linkedin.com/in/alexmorgan".into(),
            website_url: "alexmorgan.dev".into(),
        },
        summary: "Backend engineer with eight years of experience building payment \
                  and logistics platforms. Comfortable owning services from design \
                  review through on-call."
            .into(),
        experience: vec![
            Experience {
                position: "Senior Software Engineer".into(),
                company: "Northwind Logistics".into(),
                start_date: "2021-03".into(),
                end_date: String::new(),
                is_current: true,
                description: "Led the rewrite of the shipment tracking service. \
                              Cut p99 latency from 800ms to 120ms! \
                              Mentored four engineers through their first on-call rotation."
                    .into(),
            },
            Experience {
                position: "Software Engineer".into(),
                company: "Contoso Payments".into(),
                start_date: "2017-06".into(),
                end_date: "2021-02".into(),
                is_current: false,
                description: "Built the settlement reconciliation pipeline. \
                              Introduced contract tests between the ledger and API teams."
                    .into(),
            },
        ],
        education: vec![Education {
            degree: "BSc Computer Science".into(),
            institution: "Oregon State University".into(),
            year: "2017".into(),
            grade: "GPA 3.7".into(),
        }],
        skills: ["Rust", "Go", "PostgreSQL", "Kafka", "Kubernetes", "gRPC", "Terraform"]
            .into_iter()
            .map(String::from)
            .collect(),
    }
}

/// One experience entry whose description has `sentences` numbered
/// sentences of ten words each.
pub fn long_description_resume(sentences: usize) -> ResumeData {
    let description = (1..=sentences)
        .map(|i| format!("Sentence {i} describes shipped work across several busy product teams."))
        .collect::<Vec<_>>()
        .join(" ");
    ResumeData {
        personal_info: PersonalInfo {
            full_name: "Sam Rivera".into(),
            ..Default::default()
        },
        experience: vec![Experience {
            position: "Staff Engineer".into(),
            company: "Fabrikam".into(),
            start_date: "2015-01".into(),
            end_date: "2023-06".into(),
            is_current: false,
            description,
        }],
        ..Default::default()
    }
}

/// A resume with `count` short skills and nothing else but a name.
pub fn many_skills_resume(count: usize) -> ResumeData {
    ResumeData {
        personal_info: PersonalInfo {
            full_name: "Kim Lee".into(),
            ..Default::default()
        },
        skills: (1..=count).map(|i| format!("Skill {i}")).collect(),
        ..Default::default()
    }
}
