// Landing view
use crate::domain::view::{Notice, Section, View, ViewKind};

pub fn landing_view() -> View {
    let mut view = View::new(ViewKind::Home, "Electric vehicle analysis");
    view.push(Section::Text(
        "Select an option in the side menu to get started.".to_string(),
    ));
    for kind in ViewKind::ALL.iter().filter(|k| **k != ViewKind::Home) {
        view.push(Section::Text(format!("{} (/views/{})", kind.label(), kind.slug())));
    }
    view.notify(Notice::info(
        "This viewer analyses charging efficiency and usage of the electric fleet.",
    ));
    view
}
