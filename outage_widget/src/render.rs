//! HTML-fragment builders for the widget's regions. Every interpolated
//! field goes through [`esc`]; the surrounding markup is static.

use std::fmt::Write as _;

use address_search::suggestions::Suggestion;
use outage_api::{LatestReport, OutageDetail};

pub const MSG_EMPTY_ADDRESS: &str = "Veuillez saisir une adresse ou un code postal.";
pub const MSG_NETWORK_ERROR: &str = "Erreur réseau.";
pub const MSG_REPORT_MISSING_FIELDS: &str = "Renseignez au moins le département et la ville.";
pub const MSG_REPORT_ACK: &str = "Merci, votre signalement a été enregistré.";
pub const MSG_REPORT_FAILED: &str = "Erreur lors de l’enregistrement.";

const PLACEHOLDER_DASH: &str = "—";

fn esc(text: &str) -> String {
    html_escape::encode_safe(text).into_owned()
}

pub fn render_suggestions(suggestions: &[Suggestion]) -> String {
    let mut out = String::new();
    for (index, suggestion) in suggestions.iter().enumerate() {
        let _ = write!(
            out,
            "<li data-i=\"{index}\" role=\"option\">{}</li>",
            esc(&suggestion.label)
        );
    }
    out
}

pub fn outage_banner(location: &str) -> String {
    format!(
        "⚠️ <strong>Coupure(s) en cours</strong> — {}",
        esc(location)
    )
}

pub fn no_outage_banner(city: &str, postal_code: &str) -> String {
    format!(
        "✅ <strong>Pas de coupure en cours</strong> — {} ({})",
        esc(city),
        esc(postal_code)
    )
}

pub fn backend_error(message: &str) -> String {
    let message = if message.is_empty() { "inconnue" } else { message };
    format!("Erreur: {}", esc(message))
}

pub fn render_details(details: &[OutageDetail]) -> String {
    if details.is_empty() {
        return "<li>Aucun détail disponible.</li>".to_string();
    }
    let mut out = String::new();
    for detail in details {
        let localisation = if detail.localisation.is_empty() {
            "Zone impactée inconnue"
        } else {
            &detail.localisation
        };
        out.push_str("<li><strong>");
        out.push_str(&esc(localisation));
        out.push_str("</strong><br>");
        let _ = write!(
            out,
            "Début : {}",
            esc(detail.start_date.as_deref().unwrap_or(PLACEHOLDER_DASH))
        );
        if let Some(end) = non_empty(detail.estimated_end_date.as_deref()) {
            let _ = write!(out, " – Rétablissement estimé : {}", esc(end));
        }
        let _ = write!(
            out,
            "<br>Type : {} | État : {}",
            esc(detail.incident_type.as_deref().unwrap_or(PLACEHOLDER_DASH)),
            esc(detail.state.as_deref().unwrap_or(PLACEHOLDER_DASH))
        );
        if let Some(households) = detail.affected_households {
            let _ = write!(out, " | Foyers concernés : {households}");
        }
        if let Some(id) = non_empty(detail.id.as_deref()) {
            let _ = write!(out, "<br><small>ID : {}</small>", esc(id));
        }
        out.push_str("</li>");
    }
    out
}

pub fn render_latest_table(items: &[LatestReport], limit: usize) -> String {
    let mut rows = String::new();
    for item in items.iter().take(limit) {
        let _ = write!(
            rows,
            "<tr><td>{}</td><td>{}</td><td>{}</td></tr>",
            esc(&item.city),
            esc(&item.address),
            esc(&item.time)
        );
    }
    if rows.is_empty() {
        rows.push_str("<tr><td colspan=\"3\">Aucun signalement pour aujourd’hui.</td></tr>");
    }
    format!(
        "<div class=\"ppn-table-wrap\"><table class=\"ppn-table\">\
         <thead><tr><th>Ville</th><th>Adresse</th><th>Heure</th></tr></thead>\
         <tbody>{rows}</tbody></table></div>"
    )
}

pub fn status_text(message: &str) -> String {
    esc(message)
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use address_search::suggestions::Suggestion;
    use outage_api::{LatestReport, OutageDetail};

    use super::*;

    #[test]
    fn test_empty_details_render_the_placeholder_entry() {
        assert_eq!(render_details(&[]), "<li>Aucun détail disponible.</li>");
    }

    #[test]
    fn test_details_render_placeholder_dashes_for_missing_fields() {
        let rendered = render_details(&[OutageDetail::default()]);
        assert!(rendered.contains("Zone impactée inconnue"));
        assert!(rendered.contains("Début : —"));
        assert!(rendered.contains("Type : — | État : —"));
        assert!(!rendered.contains("Foyers concernés"));
        assert!(!rendered.contains("ID :"));
    }

    #[test]
    fn test_details_render_every_present_field() {
        let rendered = render_details(&[OutageDetail {
            localisation: "Lyon 3e".to_string(),
            incident_type: Some("travaux".to_string()),
            state: Some("en cours".to_string()),
            start_date: Some("08:00".to_string()),
            estimated_end_date: Some("12:00".to_string()),
            affected_households: Some(120),
            id: Some("INC-42".to_string()),
            ..Default::default()
        }]);
        assert!(rendered.contains("<strong>Lyon 3e</strong>"));
        assert!(rendered.contains("Début : 08:00"));
        assert!(rendered.contains("Rétablissement estimé : 12:00"));
        assert!(rendered.contains("Type : travaux | État : en cours"));
        assert!(rendered.contains("Foyers concernés : 120"));
        assert!(rendered.contains("<small>ID : INC-42</small>"));
    }

    #[test]
    fn test_empty_latest_table_renders_the_placeholder_row() {
        let rendered = render_latest_table(&[], 20);
        assert!(rendered.contains("Aucun signalement pour aujourd’hui."));
    }

    #[test]
    fn test_latest_table_is_capped_at_the_display_limit() {
        let items: Vec<LatestReport> = (0..30)
            .map(|index| LatestReport {
                city: format!("Ville {index}"),
                ..Default::default()
            })
            .collect();
        let rendered = render_latest_table(&items, 20);
        assert!(rendered.contains("Ville 19"));
        assert!(!rendered.contains("Ville 20"));
    }

    #[test]
    fn test_upstream_text_is_escaped() {
        let rendered = render_latest_table(
            &[LatestReport {
                city: "<script>x</script>".to_string(),
                address: "1 Rue \"B\" & C".to_string(),
                time: "10:00".to_string(),
            }],
            20,
        );
        assert!(!rendered.contains("<script>"));
        assert!(rendered.contains("&lt;script&gt;"));
        assert!(rendered.contains("&amp;"));
        assert!(!rendered.contains("\"B\""));
    }

    #[test]
    fn test_suggestion_labels_are_escaped() {
        let rendered = render_suggestions(&[Suggestion {
            label: "<b>bold</b>".to_string(),
            ..Default::default()
        }]);
        assert_eq!(
            rendered,
            "<li data-i=\"0\" role=\"option\">&lt;b&gt;bold&lt;&#x2F;b&gt;</li>"
        );
    }

    #[test]
    fn test_backend_error_defaults_to_unknown() {
        assert_eq!(backend_error(""), "Erreur: inconnue");
        assert_eq!(backend_error("surcharge"), "Erreur: surcharge");
    }

    #[test]
    fn test_banners_escape_the_location() {
        let banner = outage_banner("12 Rue <A>, 69003 Lyon 3e");
        assert!(banner.starts_with("⚠️ <strong>Coupure(s) en cours</strong> — "));
        assert!(banner.contains("&lt;A&gt;"));
        let banner = no_outage_banner("Paris", "75001");
        assert_eq!(
            banner,
            "✅ <strong>Pas de coupure en cours</strong> — Paris (75001)"
        );
    }
}
