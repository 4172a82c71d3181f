use eframe::egui::{
    ComboBox,
    Id,
    Ui,
};

/// Drop-down of checkboxes. Returns the new selection, in option order, when
/// anything was toggled.
pub fn multi_select<T: Clone + PartialEq>(
    ui: &mut Ui,
    id: Id,
    options: &[(T, String)],
    selected: &[T],
) -> Option<Vec<T>> {
    let mut toggled = None;

    let summary = if selected.is_empty() {
        "Select...".to_string()
    } else {
        options
            .iter()
            .filter(|(value, _)| selected.contains(value))
            .map(|(_, label)| label.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };

    ComboBox::from_id_salt(id).selected_text(summary).width(260.0).show_ui(ui, |ui| {
        for (index, (value, label)) in options.iter().enumerate() {
            let mut checked = selected.contains(value);
            if ui.checkbox(&mut checked, label).changed() {
                toggled = Some(index);
            }
        }
    });

    toggled.map(|index| toggle(options, selected, index))
}

fn toggle<T: Clone + PartialEq>(options: &[(T, String)], selected: &[T], index: usize) -> Vec<T> {
    options
        .iter()
        .enumerate()
        .filter(|(i, (value, _))| {
            let was_selected = selected.contains(value);
            if *i == index {
                !was_selected
            } else {
                was_selected
            }
        })
        .map(|(_, (value, _))| value.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Vec<(u8, String)> {
        vec![(1, "one".into()), (2, "two".into()), (3, "three".into())]
    }

    #[test]
    fn toggle_adds_in_option_order() {
        assert_eq!(toggle(&options(), &[3], 0), vec![1, 3]);
    }

    #[test]
    fn toggle_removes_selected() {
        assert_eq!(toggle(&options(), &[1, 2], 1), vec![1]);
    }
}
