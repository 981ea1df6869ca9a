//! Edition toolbar over text selections

use crate::dom::{Point, SelectionKind};
use crate::model::{EditionToolbar, EditorModel, FieldId};

/// Toggle the edition toolbar on mouseup.
///
/// A shown toolbar is hidden on the next mouseup whatever the selection is.
/// Otherwise a range selection shows field `id`'s toolbar centered above it.
pub(super) fn selection(model: &mut EditorModel, id: FieldId) {
    if let Some(shown) = model.toolbar.take() {
        let mount = model
            .field(shown.owner)
            .map(|owner| owner.edition.mount_point());
        if let Some(mount) = mount {
            model.doc.detach(mount);
        }
        tracing::debug!(owner = shown.owner.0, "edition toolbar hidden");
        return;
    }

    let Some(selection) = model.doc.selection().copied() else {
        return;
    };
    if selection.kind() != SelectionKind::Range {
        return;
    }
    let Some((doc, field, _)) = model.parts_mut(id) else {
        return;
    };

    field.edition.before_show(doc);
    let mount = field.edition.mount_point();
    let body = doc.body();
    doc.append_child(body, mount);

    let size = doc.size(mount);
    let top = selection.bounds.top + doc.scroll_y() - size.height;
    let left = selection.bounds.center_x() - size.width / 2.0;
    doc.set_style(mount, "top", &format!("{}px", top));
    doc.set_style(mount, "left", &format!("{}px", left));
    tracing::debug!(field = %field.name(), top, left, "edition toolbar shown");

    model.toolbar = Some(EditionToolbar {
        owner: id,
        selection,
        position: Point::new(left, top),
    });
}

#[cfg(test)]
mod tests {
    use super::super::update;
    use crate::config::EditorConfig;
    use crate::dom::{Boundary, Document, Rect, Size};
    use crate::messages::FieldEvent;
    use crate::model::{EditorModel, SlotKind};

    fn model() -> EditorModel {
        let doc = Document::from_html(
            r#"<form><div data-field="body" data-placeholder="Body" data-type="rich"><p>hello world</p></div></form>"#,
        );
        let form = doc.children(doc.body())[0];
        EditorModel::build(doc, Some(form), EditorConfig::default())
            .unwrap()
            .0
    }

    fn select_hello(model: &mut EditorModel) {
        let id = model.field_id("body").unwrap();
        let element = model.field(id).unwrap().element();
        let doc = model.document_mut();
        let text = doc.children(doc.children(element)[0])[0];
        doc.select(
            Boundary::new(text, 0),
            Boundary::new(text, 5),
            Rect::new(100.0, 200.0, 160.0, 220.0),
        );
    }

    #[test]
    fn test_range_shows_toolbar_above_selection() {
        let mut model = model();
        let id = model.field_id("body").unwrap();
        let mount = model.field(id).unwrap().slot(SlotKind::Edition).mount_point();
        model.document_mut().set_size(mount, Size::new(80.0, 30.0));
        model.document_mut().set_scroll_y(50.0);
        select_hello(&mut model);

        update(&mut model, id, &FieldEvent::MouseUp);

        let doc = model.document();
        assert_eq!(doc.parent(mount), Some(doc.body()));
        assert_eq!(doc.style(mount, "top").as_deref(), Some("220px"));
        assert_eq!(doc.style(mount, "left").as_deref(), Some("90px"));
        assert_eq!(model.toolbar().map(|t| t.owner), Some(id));
    }

    #[test]
    fn test_collapsed_selection_shows_nothing() {
        let mut model = model();
        let id = model.field_id("body").unwrap();
        let element = model.field(id).unwrap().element();
        model.document_mut().set_caret(element, 0);

        update(&mut model, id, &FieldEvent::MouseUp);
        assert!(model.toolbar().is_none());
    }

    #[test]
    fn test_second_mouseup_hides_even_with_range() {
        let mut model = model();
        let id = model.field_id("body").unwrap();
        let mount = model.field(id).unwrap().slot(SlotKind::Edition).mount_point();
        select_hello(&mut model);

        update(&mut model, id, &FieldEvent::MouseUp);
        select_hello(&mut model);
        update(&mut model, id, &FieldEvent::MouseUp);

        assert!(model.toolbar().is_none());
        assert!(!model.document().is_connected(mount));

        update(&mut model, id, &FieldEvent::MouseUp);
        assert!(model.toolbar().is_some());
    }
}
