//! Plain-text rendering of view models.
//!
//! Renderers return a `String` instead of printing so the caller decides where
//! output goes. Layout is fixed-width; no terminal escape sequences are used.

use super::viewmodel::{Banner, DetailViewModel, TableRow, TableViewModel};

const ID_WIDTH: usize = 24;
const NAME_WIDTH: usize = 28;
const MOBILE_WIDTH: usize = 12;
const ASSEMBLY_WIDTH: usize = 20;
const STATUS_WIDTH: usize = 9;
const LABEL_WIDTH: usize = 18;

/// Renders the applications table.
///
/// Layout: banner (if any), header line, column headers, one line per row or
/// the empty state. The selected row is marked with `>`.
#[must_use]
pub fn render_table(vm: &TableViewModel) -> String {
    let mut out = String::new();

    if let Some(banner) = &vm.banner {
        out.push_str(&render_banner(banner));
        out.push('\n');
    }

    if vm.header.count == vm.header.total {
        out.push_str(&format!("{} ({})\n", vm.header.title, vm.header.total));
    } else {
        out.push_str(&format!("{} ({} of {})\n", vm.header.title, vm.header.count, vm.header.total));
    }

    if let Some(empty) = &vm.empty_state {
        out.push('\n');
        out.push_str(&format!("  {}\n", empty.message));
        out.push_str(&format!("  {}\n", empty.subtitle));
        return out;
    }

    out.push_str(&format!(
        "  {:<ID_WIDTH$} {:<NAME_WIDTH$} {:<MOBILE_WIDTH$} {:<ASSEMBLY_WIDTH$} {:<STATUS_WIDTH$} {}\n",
        "ID", "NAME", "MOBILE", "ASSEMBLY", "STATUS", "TEAM"
    ));
    for row in &vm.rows {
        out.push_str(&render_row(row));
        out.push('\n');
    }
    out
}

fn render_row(row: &TableRow) -> String {
    let marker = if row.is_selected { '>' } else { ' ' };
    let line = format!(
        "{marker} {:<ID_WIDTH$} {:<NAME_WIDTH$} {:<MOBILE_WIDTH$} {:<ASSEMBLY_WIDTH$} {:<STATUS_WIDTH$} {}",
        row.id,
        row.name,
        row.mobile,
        row.assembly,
        row.status.as_str(),
        row.team_size
    );
    line.trim_end().to_string()
}

fn render_banner(banner: &Banner) -> String {
    match banner {
        Banner::Loading => "[loading...]".to_string(),
        Banner::Error(message) => format!("[error] {message}"),
    }
}

/// Renders one application as labelled lines followed by its team.
#[must_use]
pub fn render_detail(vm: &DetailViewModel) -> String {
    let mut out = format!("{} [{}]\n", vm.title, vm.status);
    out.push_str(&"-".repeat(vm.title.chars().count() + vm.status.as_str().len() + 3));
    out.push('\n');

    for (label, value) in &vm.fields {
        out.push_str(&format!("{label:<LABEL_WIDTH$} {value}\n"));
    }

    out.push_str(&format!("\nTeam members ({})\n", vm.team_members.len()));
    for (i, member) in vm.team_members.iter().enumerate() {
        out.push_str(&format!("  {}. {member}\n", i + 1));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::StoreSnapshot;
    use crate::domain::{Application, ApplicationStatus, Place};

    #[test]
    fn table_lists_rows_under_headers() {
        let mut app = Application::new("66a1", "Asha Menon").with_status(ApplicationStatus::Approved);
        app.mobile = Some("9847000000".into());
        app.legislative_assembly = Some(Place::new("n1", "Nemom"));
        let snapshot = StoreSnapshot {
            applications: vec![app.clone()],
            selected_application: Some(app),
            ..StoreSnapshot::default()
        };

        let text = render_table(&TableViewModel::compute(&snapshot, ""));
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Candidate Applications (1)");
        assert!(lines[1].trim_start().starts_with("ID"));
        assert!(lines[2].starts_with("> 66a1"));
        assert!(lines[2].contains("Nemom"));
        assert!(lines[2].contains("approved"));
    }

    #[test]
    fn table_shows_error_banner_and_empty_state() {
        let snapshot = StoreSnapshot {
            error: Some("Something went wrong".into()),
            ..StoreSnapshot::default()
        };

        let text = render_table(&TableViewModel::compute(&snapshot, ""));

        assert!(text.starts_with("[error] Something went wrong\n"));
        assert!(text.contains("No applications found"));
        assert!(!text.contains("MOBILE"));
    }

    #[test]
    fn filtered_header_shows_both_counts() {
        let snapshot = StoreSnapshot {
            applications: vec![Application::new("a", "Arun"), Application::new("b", "Bina")],
            ..StoreSnapshot::default()
        };
        let text = render_table(&TableViewModel::compute(&snapshot, "bina"));
        assert!(text.starts_with("Candidate Applications (1 of 2)\n"));
    }

    #[test]
    fn detail_ends_with_numbered_team() {
        let mut app = Application::new("a", "Arun");
        app.team_members = vec![crate::domain::TeamMember::new("Manu", "")];

        let text = render_detail(&DetailViewModel::from_application(&app));

        assert!(text.starts_with("Arun [pending]\n"));
        assert!(text.ends_with("Team members (1)\n  1. Manu\n"));
    }
}
