//! Resume data model – the immutable input of one render.
//!
//! All fields default when missing from the JSON input, and blank strings
//! are treated as absent by the layout engine.

use serde::{Deserialize, Serialize};

/// Everything a resume can contain.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResumeData {
    pub personal_info: PersonalInfo,
    pub summary: String,
    /// Rendered in the given order; sorting is the caller's job.
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    /// Rendered in the given order, duplicates included.
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersonalInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub linked_in_url: String,
    pub website_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Experience {
    pub position: String,
    pub company: String,
    /// `YYYY-MM`
    pub start_date: String,
    /// `YYYY-MM`, ignored when `is_current` is set.
    pub end_date: String,
    pub is_current: bool,
    /// Free text; each sentence becomes one bullet.
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Education {
    pub degree: String,
    pub institution: String,
    pub year: String,
    pub grade: String,
}

/// Returns the trimmed value, or `None` when it is blank.
pub fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

impl ResumeData {
    /// Parse camelCase JSON as produced by the resume builder form.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The most recent position, shown under the name by the modern designs.
    pub fn headline(&self) -> Option<&str> {
        self.experience
            .iter()
            .find_map(|entry| non_blank(&entry.position))
    }

    pub fn summary_text(&self) -> Option<&str> {
        non_blank(&self.summary)
    }

    /// Non-blank skills, in input order.
    pub fn skill_list(&self) -> Vec<&str> {
        self.skills.iter().filter_map(|s| non_blank(s)).collect()
    }
}

impl PersonalInfo {
    pub fn name(&self) -> Option<&str> {
        non_blank(&self.full_name)
    }

    /// Contact details in display order: email, phone, location, LinkedIn,
    /// website. Blank fields are skipped.
    pub fn contact_items(&self) -> Vec<&str> {
        [
            &self.email,
            &self.phone,
            &self.location,
            &self.linked_in_url,
            &self.website_url,
        ]
        .into_iter()
        .filter_map(|field| non_blank(field))
        .collect()
    }

    /// Up to two upper-case initials: first and last word of the name.
    pub fn initials(&self) -> String {
        let words: Vec<&str> = self.full_name.split_whitespace().collect();
        let mut initials = String::new();
        if let Some(first) = words.first().and_then(|w| w.chars().next()) {
            initials.extend(first.to_uppercase());
        }
        if words.len() > 1 {
            if let Some(last) = words.last().and_then(|w| w.chars().next()) {
                initials.extend(last.to_uppercase());
            }
        }
        initials
    }
}

impl Experience {
    pub fn has_content(&self) -> bool {
        [
            &self.position,
            &self.company,
            &self.start_date,
            &self.end_date,
            &self.description,
        ]
        .into_iter()
        .any(|field| non_blank(field).is_some())
            || self.is_current
    }
}

impl Education {
    pub fn has_content(&self) -> bool {
        [&self.degree, &self.institution, &self.year, &self.grade]
            .into_iter()
            .any(|field| non_blank(field).is_some())
    }
}
