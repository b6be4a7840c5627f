use serde::{Deserialize, Serialize};

/// The ten-question alternative to uploading a resume.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ManualAnswers {
    pub role: String,
    pub responsibilities: String,
    pub key_skills: String,
    pub projects: String,
    pub accomplishments: String,
    pub technical_tools: String,
    pub proficient_tools: String,
    pub communication_teamwork: String,
    pub training_certifications: String,
    pub strengths_opportunities: String,
}

/// One question of the form, for editing a single answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManualField {
    Role,
    Responsibilities,
    KeySkills,
    Projects,
    Accomplishments,
    TechnicalTools,
    ProficientTools,
    CommunicationTeamwork,
    TrainingCertifications,
    StrengthsOpportunities,
}

impl ManualAnswers {
    pub fn set(&mut self, field: ManualField, value: String) {
        let slot = match field {
            ManualField::Role => &mut self.role,
            ManualField::Responsibilities => &mut self.responsibilities,
            ManualField::KeySkills => &mut self.key_skills,
            ManualField::Projects => &mut self.projects,
            ManualField::Accomplishments => &mut self.accomplishments,
            ManualField::TechnicalTools => &mut self.technical_tools,
            ManualField::ProficientTools => &mut self.proficient_tools,
            ManualField::CommunicationTeamwork => &mut self.communication_teamwork,
            ManualField::TrainingCertifications => &mut self.training_certifications,
            ManualField::StrengthsOpportunities => &mut self.strengths_opportunities,
        };
        *slot = value;
    }

    fn labelled(&self) -> [(&'static str, &str); 10] {
        [
            ("Role in the Last 18 Months", self.role.as_str()),
            ("Main Responsibilities", self.responsibilities.as_str()),
            ("Key Skills Utilized", self.key_skills.as_str()),
            ("Key Projects/Initiatives", self.projects.as_str()),
            ("Significant Accomplishments", self.accomplishments.as_str()),
            ("Technical Tools/Platforms Worked With", self.technical_tools.as_str()),
            ("Tools You Are Most Proficient In", self.proficient_tools.as_str()),
            ("Communication and Teamwork Skills", self.communication_teamwork.as_str()),
            ("Training or Certifications", self.training_certifications.as_str()),
            (
                "Strongest Skills & Improvement Opportunities",
                self.strengths_opportunities.as_str(),
            ),
        ]
    }

    /// Labels of the questions left blank, in form order.
    pub fn unanswered(&self) -> Vec<&'static str> {
        self.labelled()
            .into_iter()
            .filter(|(_, answer)| answer.trim().is_empty())
            .map(|(label, _)| label)
            .collect()
    }

    /// Composes the answers into a resume-like text block, one labelled line each.
    pub fn compose(&self) -> String {
        self.labelled()
            .into_iter()
            .map(|(label, answer)| format!("{label}: {}", answer.trim()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
