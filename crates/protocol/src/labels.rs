//! Bilingual display strings for filter controls and listing states.

use crate::{Language, ProjectStatus, SystemType};

/// Something with a human-facing label in each site language.
pub trait Localized {
    fn label(&self, lang: Language) -> &'static str;
}

impl Localized for ProjectStatus {
    fn label(&self, lang: Language) -> &'static str {
        match lang {
            Language::En => self.as_str(),
            Language::Uk => match self {
                ProjectStatus::Planning => "Планування",
                ProjectStatus::Design => "Проєктування",
                ProjectStatus::Construction => "Будівництво",
                ProjectStatus::Operational => "Діючий",
                ProjectStatus::Completed => "Завершено",
            },
        }
    }
}

impl Localized for SystemType {
    fn label(&self, lang: Language) -> &'static str {
        match lang {
            Language::En => self.as_str(),
            Language::Uk => match self {
                SystemType::Ras => "УЗВ",
                SystemType::Biofloc => "Біофлок",
                SystemType::Hybrid => "Гібридна",
                SystemType::FlowThrough => "Проточна",
                SystemType::Imta => "ІМТА",
                SystemType::Other => "Інше",
            },
        }
    }
}

/// Fixed interface strings of the projects listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    AllStatuses,
    AllSystemTypes,
    AllSpecies,
    AllRegions,
    NoMatches,
    ResetFilters,
    NoProjects,
    LoadFailed,
    ProjectNotFound,
    Status,
    SystemType,
    Species,
    Region,
    Capex,
    Revenue,
    Roi,
    AnnualProduction,
}

impl Localized for Message {
    fn label(&self, lang: Language) -> &'static str {
        let (en, uk) = match self {
            Message::AllStatuses | Message::AllSystemTypes => ("All", "Усі"),
            Message::AllSpecies => ("All Species", "Усі види"),
            Message::AllRegions => ("All Regions", "Усі регіони"),
            Message::NoMatches => (
                "No projects match the selected filters.",
                "Жоден проєкт не відповідає вибраним фільтрам.",
            ),
            Message::ResetFilters => ("Reset filters", "Скинути фільтри"),
            Message::NoProjects => (
                "No projects have been published yet.",
                "Проєкти ще не опубліковано.",
            ),
            Message::LoadFailed => (
                "Projects could not be loaded. Please try again later.",
                "Не вдалося завантажити проєкти. Спробуйте пізніше.",
            ),
            Message::ProjectNotFound => ("Project not found", "Проєкт не знайдено"),
            Message::Status => ("Status", "Статус"),
            Message::SystemType => ("System type", "Тип системи"),
            Message::Species => ("Species", "Види"),
            Message::Region => ("Region", "Регіон"),
            Message::Capex => ("Capital expenditure", "Капітальні витрати"),
            Message::Revenue => ("Revenue", "Дохід"),
            Message::Roi => ("ROI", "Рентабельність інвестицій"),
            Message::AnnualProduction => ("Annual production", "Річне виробництво"),
        };
        match lang {
            Language::En => en,
            Language::Uk => uk,
        }
    }
}

/// "3 projects" / "3 проєкти" with Ukrainian plural rules.
#[must_use]
pub fn project_count(count: usize, lang: Language) -> String {
    match lang {
        Language::En if count == 1 => "1 project".to_string(),
        Language::En => format!("{count} projects"),
        Language::Uk => {
            let word = match (count % 10, count % 100) {
                (1, n) if n != 11 => "проєкт",
                (2..=4, n) if !(12..=14).contains(&n) => "проєкти",
                _ => "проєктів",
            };
            format!("{count} {word}")
        }
    }
}
