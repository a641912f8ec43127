//! Tokenizer and compiler behavior tests.

use super::*;
use crate::fiche::{Fiche, FicheMeta, TrustScores, TrustTier, VarKind, Variable};

fn fiche_with(preprompt: &str, variables: Vec<Variable>) -> Fiche {
    Fiche {
        meta: FicheMeta {
            category: "RCH".into(),
            title: "Test".into(),
            ..FicheMeta::default()
        },
        trust: TrustScores::uniform(TrustTier::Full),
        variables,
        preprompt: preprompt.into(),
    }
}

fn var(id: &str, kind: VarKind, required: bool) -> Variable {
    Variable {
        label: id.to_uppercase(),
        id: id.into(),
        kind,
        required,
    }
}

#[test]
fn tokenizer_splits_text_and_placeholders() {
    let tokens = tokenize("Hello {{name}}, code {{code}}");
    assert_eq!(
        tokens,
        vec![
            Token::Text("Hello "),
            Token::Placeholder("name"),
            Token::Text(", code "),
            Token::Placeholder("code"),
        ]
    );
}

#[test]
fn tokenizer_keeps_unclosed_braces_literal() {
    assert_eq!(tokenize("open {{name"), vec![Token::Text("open {{name")]);
    assert_eq!(tokenize("{{}} after"), vec![
        Token::Placeholder(""),
        Token::Text(" after"),
    ]);
}

#[test]
fn substitution_replaces_every_occurrence() {
    let fiche = fiche_with(
        "Hello {{name}}, code {{code}}. Again: {{name}}!",
        vec![var("name", VarKind::Text, false), var("code", VarKind::Text, false)],
    );
    let mut bindings = Bindings::new();
    bindings.set("name", Binding::scalar("Ana"));
    bindings.set("code", Binding::scalar("X1"));

    let compiled = compile(&fiche, &bindings, "");
    assert!(compiled.text.starts_with("Hello Ana, code X1. Again: Ana!"));
}

#[test]
fn unknown_placeholders_pass_through() {
    let fiche = fiche_with("Secteur {{secteur}} / {{inconnu}}", vec![var(
        "secteur",
        VarKind::Text,
        false,
    )]);
    let mut bindings = Bindings::new();
    bindings.set("secteur", Binding::scalar("Nord"));

    let compiled = compile(&fiche, &bindings, "");
    assert!(compiled.text.starts_with("Secteur Nord / {{inconnu}}"));
}

#[test]
fn unbound_declared_variable_substitutes_empty() {
    let fiche = fiche_with("Avant {{x}} après", vec![var("x", VarKind::Text, false)]);
    let compiled = compile(&fiche, &Bindings::new(), "");
    assert!(compiled.text.starts_with("Avant  après"));
    assert!(compiled.is_ready());
}

#[test]
fn recap_block_lists_variables_in_declaration_order() {
    let fiche = fiche_with(
        "{{b}} {{a}}",
        vec![var("b", VarKind::Text, false), var("a", VarKind::Text, false)],
    );
    let mut bindings = Bindings::new();
    bindings.set("a", Binding::scalar("1"));
    bindings.set("b", Binding::scalar("2"));

    let compiled = compile(&fiche, &bindings, "RAS");
    let expected = format!("2 1{RECAP_HEADER}b = 2\na = 1\n{NOTES_HEADER}RAS");
    assert_eq!(compiled.text, expected);
}

#[test]
fn notes_are_appended_verbatim() {
    let fiche = fiche_with("P", vec![]);
    let compiled = compile(&fiche, &Bindings::new(), "ligne 1\nligne 2");
    assert!(compiled.text.ends_with(&format!("{NOTES_HEADER}ligne 1\nligne 2")));
}

#[test]
fn scalar_values_are_trimmed() {
    let fiche = fiche_with("{{v}}", vec![var("v", VarKind::Number, false)]);
    let mut bindings = Bindings::new();
    bindings.set("v", Binding::scalar("  42  "));
    let compiled = compile(&fiche, &bindings, "");
    assert!(compiled.text.starts_with("42"));
}

#[test]
fn geolocation_renders_six_decimal_places() {
    let fiche = fiche_with("Ici: {{pos}}", vec![var("pos", VarKind::Geolocation, false)]);
    let mut bindings = Bindings::new();
    bindings.set("pos", Binding::position(48.856614, 2.352222));
    let compiled = compile(&fiche, &bindings, "");
    assert!(compiled
        .text
        .starts_with("Ici: lat=48.856614, lon=2.352222"));
}

#[test]
fn partial_geolocation_counts_as_missing() {
    let fiche = fiche_with("{{pos}}", vec![var("pos", VarKind::Geolocation, true)]);
    let mut bindings = Bindings::new();
    bindings.set(
        "pos",
        Binding::Position {
            lat: Some(48.8),
            lon: None,
        },
    );
    let compiled = compile(&fiche, &bindings, "");
    assert_eq!(
        compiled.missing_required.iter().collect::<Vec<_>>(),
        vec!["pos"]
    );
}

#[test]
fn all_missing_required_ids_are_reported() {
    // no short-circuit: every required row shows up
    let fiche = fiche_with(
        "{{a}} {{b}} {{c}}",
        vec![
            var("a", VarKind::Text, true),
            var("b", VarKind::Text, false),
            var("c", VarKind::Text, true),
        ],
    );
    let compiled = compile(&fiche, &Bindings::new(), "");
    assert_eq!(
        compiled.missing_required.iter().collect::<Vec<_>>(),
        vec!["a", "c"]
    );
    assert!(!compiled.is_ready());
}

#[test]
fn whitespace_only_scalar_is_missing_when_required() {
    let fiche = fiche_with("{{a}}", vec![var("a", VarKind::Text, true)]);
    let mut bindings = Bindings::new();
    bindings.set("a", Binding::scalar("   "));
    let compiled = compile(&fiche, &bindings, "");
    assert!(compiled.missing_required.contains("a"));
}

#[test]
fn compile_is_idempotent() {
    let fiche = fiche_with("{{a}} et {{a}}", vec![var("a", VarKind::Text, true)]);
    let mut bindings = Bindings::new();
    bindings.set("a", Binding::scalar("valeur"));
    let first = compile(&fiche, &bindings, "notes");
    let second = compile(&fiche, &bindings, "notes");
    assert_eq!(first, second);
}
