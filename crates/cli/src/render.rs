use aquasite_protocol::labels::{project_count, Localized, Message};
use aquasite_protocol::{Amount, Language, ProjectRecord, Quantity};
use aquasite_search::{Facets, FilterOutcome};

pub(crate) fn listing(outcome: &FilterOutcome<'_>, lang: Language) -> Vec<String> {
    if outcome.is_empty() {
        return empty_state(outcome, lang);
    }

    let mut lines = vec![project_count(outcome.len(), lang)];
    for project in outcome.iter() {
        lines.push(format!("  {}  {}", project.slug, project.title));
        let summary = classification(project, lang);
        if !summary.is_empty() {
            lines.push(format!("      {summary}"));
        }
    }
    lines
}

fn empty_state(outcome: &FilterOutcome<'_>, lang: Language) -> Vec<String> {
    if outcome.reset_offered() {
        vec![
            Message::NoMatches.label(lang).to_string(),
            format!(
                "{}: aquasite projects --lang {}",
                Message::ResetFilters.label(lang),
                lang.code()
            ),
        ]
    } else {
        vec![Message::NoProjects.label(lang).to_string()]
    }
}

fn classification(project: &ProjectRecord, lang: Language) -> String {
    let mut parts: Vec<String> = Vec::new();
    if !project.status.is_empty() {
        parts.push(join_labels(&project.status, lang));
    }
    if !project.system_type.is_empty() {
        parts.push(join_labels(&project.system_type, lang));
    }
    if let Some(species) = &project.species_text {
        parts.push(species.clone());
    }
    if let Some(location) = &project.location {
        parts.push(location.clone());
    }
    parts.join(" | ")
}

fn join_labels<T: Localized>(values: &[T], lang: Language) -> String {
    values
        .iter()
        .map(|value| value.label(lang))
        .collect::<Vec<_>>()
        .join(", ")
}

pub(crate) fn facets(facets: &Facets, lang: Language) -> Vec<String> {
    let statuses = std::iter::once(Message::AllStatuses.label(lang).to_string())
        .chain(facets.statuses.iter().map(|s| s.label(lang).to_string()));
    let systems = std::iter::once(Message::AllSystemTypes.label(lang).to_string())
        .chain(facets.system_types.iter().map(|s| s.label(lang).to_string()));
    let species = std::iter::once(Message::AllSpecies.label(lang).to_string())
        .chain(facets.species.iter().cloned());
    let regions = std::iter::once(Message::AllRegions.label(lang).to_string())
        .chain(facets.regions.iter().cloned());

    vec![
        format!("{}: {}", Message::Status.label(lang), statuses.collect::<Vec<_>>().join(", ")),
        format!("{}: {}", Message::SystemType.label(lang), systems.collect::<Vec<_>>().join(", ")),
        format!("{}: {}", Message::Species.label(lang), species.collect::<Vec<_>>().join(", ")),
        format!("{}: {}", Message::Region.label(lang), regions.collect::<Vec<_>>().join(", ")),
    ]
}

pub(crate) fn project_detail(project: &ProjectRecord, lang: Language) -> Vec<String> {
    let mut lines = vec![project.title.clone(), format!("/{}/projects/{}", lang.code(), project.slug)];

    let excerpt = project.plain_excerpt();
    if !excerpt.is_empty() {
        lines.push(String::new());
        lines.push(excerpt);
    }
    lines.push(String::new());

    let mut field = |label: Message, value: String| {
        lines.push(format!("{}: {value}", label.label(lang)));
    };
    if !project.status.is_empty() {
        field(Message::Status, join_labels(&project.status, lang));
    }
    if !project.system_type.is_empty() {
        field(Message::SystemType, join_labels(&project.system_type, lang));
    }
    if let Some(species) = &project.species_text {
        field(Message::Species, species.clone());
    }
    if let Some(location) = &project.location {
        field(Message::Region, location.clone());
    }

    let figures = &project.figures;
    if let Some(capex) = &figures.capex {
        field(Message::Capex, amount(capex));
    }
    if let Some(revenue) = &figures.revenue {
        field(Message::Revenue, amount(revenue));
    }
    if let Some(roi) = figures.roi_percent {
        field(Message::Roi, format!("{}%", number(roi)));
    }
    if let Some(production) = &figures.annual_production {
        field(Message::AnnualProduction, quantity(production));
    }

    if let Some(image) = &project.hero_image {
        lines.push(String::new());
        lines.push(format!("[{}] {}", image.alt, image.url));
    }
    lines
}

fn amount(amount: &Amount) -> String {
    match &amount.currency {
        Some(currency) => format!("{} {currency}", number(amount.value)),
        None => number(amount.value),
    }
}

fn quantity(quantity: &Quantity) -> String {
    match &quantity.unit {
        Some(unit) => format!("{} {unit}", number(quantity.value)),
        None => number(quantity.value),
    }
}

/// Whole numbers get thousands separators; fractions keep two decimals.
fn number(value: f64) -> String {
    if value.fract() != 0.0 || value.abs() >= 1e15 {
        return format!("{value:.2}");
    }
    let digits = format!("{}", value.abs() as u64);
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }
    if value < 0.0 {
        grouped.insert(0, '-');
    }
    grouped
}
