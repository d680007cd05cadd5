//! End-to-end editing sessions

use doc_model::{Document, Node, Point, Position, Run, Selection};
use edit_engine::{
    DeleteRange, EditingEngine, EngineConfig, InsertPlaceholder, InsertText, SplitParagraph,
};
use proptest::prelude::*;
use render_model::{render_text, AttributeMapping};
use template_codec::{build_document, serialize_document};

fn engine(value: &str) -> EditingEngine {
    EditingEngine::with_value(EngineConfig::default(), value)
}

#[test]
fn test_select_all_then_insert_placeholder() {
    let mut engine = engine("first line\nsecond {{ x }} line\nthird");
    engine.select_all().unwrap();
    engine.insert_default_placeholder().unwrap();

    let doc = engine.document();
    assert_eq!(doc.paragraph_count(), 1);
    assert_eq!(
        doc.paragraphs()[0].runs(),
        &[Run::placeholder("{{ foo bar buzz }}"), Run::text("")]
    );
    assert_eq!(engine.serialized(), "{{ foo bar buzz }}");
    assert_eq!(engine.selection(), Selection::collapsed(Position::new(0, 1, 0)));
}

#[test]
fn test_select_all_then_delete() {
    let mut engine = engine("a\n{{ b }}\nc");
    engine.select_all().unwrap();
    let selection = engine.selection();
    engine
        .execute(Box::new(DeleteRange::from_selection(&selection)))
        .unwrap();

    assert_eq!(engine.document(), &Document::new());
    assert_eq!(engine.serialized(), "");
}

#[test]
fn test_replace_placeholder_then_type_after_it() {
    let mut engine = engine("Dear {{ name }},");
    engine
        .set_selection(Selection::new(Position::new(0, 1, 0), Position::new(0, 1, 1)))
        .unwrap();
    engine
        .execute(Box::new(InsertPlaceholder::new("{{ first_name }}")))
        .unwrap();
    engine.execute(Box::new(InsertText::new(" Smith"))).unwrap();

    let runs = engine.document().paragraphs()[0].runs();
    assert_eq!(
        runs,
        &[
            Run::text("Dear "),
            Run::placeholder("{{ first_name }}"),
            Run::text(" Smith,"),
        ]
    );
    assert_eq!(engine.serialized(), "Dear {{ first_name }} Smith,");
    assert!(engine.document().paragraphs()[0].is_normalized());
}

#[test]
fn test_session_never_reparses_its_output() {
    let mut engine = engine("{{ a }}");
    let id = engine.document().placeholders().next().map(|p| p.id());

    engine
        .set_selection(Selection::collapsed(Position::new(0, 0, 1)))
        .unwrap();
    engine.execute(Box::new(InsertText::new(" and more"))).unwrap();
    let own = engine.serialized().to_string();
    assert!(!engine.replace_value(&own));

    assert_eq!(engine.document().placeholders().next().map(|p| p.id()), id);
}

#[test]
fn test_enter_between_placeholders() {
    let mut engine = engine("{{ a }}{{ b }}");
    engine
        .set_selection(Selection::collapsed(Position::new(0, 1, 0)))
        .unwrap();
    engine.execute(Box::new(SplitParagraph::new())).unwrap();

    assert_eq!(engine.serialized(), "{{ a }}\n{{ b }}");
    assert_eq!(engine.document(), &build_document("{{ a }}\n{{ b }}"));
}

#[derive(Debug, Clone)]
enum Op {
    Type(String),
    Placeholder(String),
    Enter,
    Select(usize, usize, usize, usize),
    Delete(usize, usize, usize, usize),
}

fn op() -> impl Strategy<Value = Op> {
    let index = || 0usize..64;
    prop_oneof![
        "[a-z {}\n]{0,5}".prop_map(Op::Type),
        "[a-z]{1,4}".prop_map(|k| Op::Placeholder(format!("{{{{ {} }}}}", k))),
        Just(Op::Enter),
        (index(), index(), index(), index()).prop_map(|(a, b, c, d)| Op::Select(a, b, c, d)),
        (index(), index(), index(), index()).prop_map(|(a, b, c, d)| Op::Delete(a, b, c, d)),
    ]
}

/// A valid point picked from two arbitrary numbers
fn pick(doc: &Document, paragraph: usize, column: usize) -> Point {
    let paragraph = paragraph % doc.paragraph_count();
    let width = doc.paragraphs()[paragraph].width();
    Point::new(paragraph, column % (width + 1))
}

fn run_ops(engine: &mut EditingEngine, ops: &[Op]) {
    for op in ops {
        let doc = engine.document().clone();
        match op {
            Op::Type(text) => engine.execute(Box::new(InsertText::new(text.as_str()))).unwrap(),
            Op::Placeholder(key) => engine
                .execute(Box::new(InsertPlaceholder::new(key.as_str())))
                .unwrap(),
            Op::Enter => engine.execute(Box::new(SplitParagraph::new())).unwrap(),
            Op::Select(a, b, c, d) => {
                let anchor = doc.position(pick(&doc, *a, *b)).unwrap();
                let focus = doc.position(pick(&doc, *c, *d)).unwrap();
                engine.set_selection(Selection::new(anchor, focus)).unwrap();
            }
            Op::Delete(a, b, c, d) => {
                let (x, y) = (pick(&doc, *a, *b), pick(&doc, *c, *d));
                let (start, end) = if x <= y { (x, y) } else { (y, x) };
                let cmd = DeleteRange::new(doc.position(start).unwrap(), doc.position(end).unwrap());
                engine.execute(Box::new(cmd)).unwrap();
            }
        }
    }
}

proptest! {
    #[test]
    fn commands_keep_paragraphs_canonical(
        seed in "[a-z ]{0,6}(\\{\\{ [a-z] \\}\\})?[a-z ]{0,6}",
        ops in prop::collection::vec(op(), 0..24),
    ) {
        let mut engine = engine(&seed);
        run_ops(&mut engine, &ops);

        let doc = engine.document();
        prop_assert!(doc.paragraph_count() >= 1);
        prop_assert!(doc.paragraphs().iter().all(|p| p.is_normalized()));
        prop_assert!(doc.point(&engine.selection().focus).is_ok());
        prop_assert_eq!(engine.serialized(), serialize_document(doc));
    }

    #[test]
    fn edited_output_round_trips(ops in prop::collection::vec(op(), 0..24)) {
        let mut engine = engine("");
        run_ops(&mut engine, &ops);

        let out = engine.serialized().to_string();
        prop_assert_eq!(serialize_document(&build_document(&out)), out);
    }

    #[test]
    fn counter_matches_rendered_text(ops in prop::collection::vec(op(), 0..24)) {
        let mut engine = engine("{{ a }} and {{ b }}");
        let mapping: AttributeMapping = [("{{ a }}", "alpha")].into_iter().collect();
        engine.set_mapping(mapping.clone());
        run_ops(&mut engine, &ops);

        let rendered = render_text(engine.document(), &mapping);
        prop_assert_eq!(engine.rendered_length(), rendered.chars().count());
        prop_assert_eq!(engine.counter().current, engine.rendered_length());
    }
}
