//! Edge case tests for tinct-lang

#[cfg(test)]
mod tests {
    use crate::{
        parse_compiled, write_compiled, GroupId, GroupSpec, LanguageDefinition, LanguageSpec,
        OPERATOR_ALPHABET, PUNCTUATION_ALPHABET,
    };

    fn build(groups: &[(&str, &str)]) -> LanguageDefinition {
        let mut spec = LanguageSpec::new("Edge");
        for (name, words) in groups {
            spec = spec.group(GroupSpec::from_words(*name, words));
        }
        LanguageDefinition::build(spec)
    }

    // ==================== EDGE CASES ====================

    #[test]
    fn test_edge_no_groups_keeps_full_alphabets() {
        let lang = build(&[]);
        assert_eq!(lang.operators().len(), OPERATOR_ALPHABET.chars().count());
        assert_eq!(lang.punctuation().len(), PUNCTUATION_ALPHABET.chars().count());
        assert!(lang.key_start().is_empty());
        assert!(lang.key_continue().is_empty());
    }

    #[test]
    fn test_edge_empty_group_keeps_its_id() {
        let lang = build(&[("empty", ""), ("kw", "if")]);
        assert_eq!(lang.groups().len(), 2);
        assert!(lang.group(GroupId(0)).unwrap().is_empty());
        assert_eq!(lang.lookup_keyword("if"), Some(GroupId(1)));
    }

    #[test]
    fn test_edge_single_char_keyword() {
        let lang = build(&[("kw", "$")]);
        assert!(lang.key_start().contains('$'));
        assert!(!lang.is_punctuation('$'));
        assert_eq!(lang.lookup_keyword("$"), Some(GroupId(0)));
    }

    #[test]
    fn test_edge_operator_only_keyword_removes_operators() {
        let lang = build(&[("ops", "-> =>")]);
        assert!(!lang.is_operator('-'));
        assert!(!lang.is_operator('='));
        assert!(!lang.is_operator('>'));
        assert!(lang.is_operator('<'));
    }

    #[test]
    fn test_edge_non_ascii_keywords() {
        let lang = build(&[("kw", "λ функция")]);
        assert_eq!(lang.lookup_keyword("функция"), Some(GroupId(0)));
        assert!(lang.key_start().contains('λ'));
        assert!(lang.key_continue().contains('я'));
    }

    #[test]
    fn test_edge_lookup_is_case_sensitive() {
        let lang = build(&[("kw", "SELECT")]);
        assert!(lang.lookup_keyword("SELECT").is_some());
        assert!(lang.lookup_keyword("select").is_none());
        assert!(lang.lookup_keyword("SELEC").is_none());
        assert!(lang.lookup_keyword("SELECTED").is_none());
    }

    #[test]
    fn test_edge_sort_is_ordinal() {
        let lang = build(&[("kw", "b B a _ Z")]);
        let texts: Vec<&str> = lang.keywords().iter().map(|k| k.text.as_str()).collect();
        assert_eq!(texts, vec!["B", "Z", "_", "a", "b"]);
    }

    #[test]
    fn test_edge_build_is_pure() {
        let groups = [("kw", "if else"), ("ty", "int")];
        assert_eq!(build(&groups), build(&groups));
    }

    // ==================== PROPERTIES ====================

    #[test]
    fn test_property_keyword_chars_never_operator_or_punctuation() {
        use proptest::prelude::*;

        proptest!(|(groups in prop::collection::vec(
            prop::collection::vec("[a-z#@:;.<>=+\\-*!~$]{1,6}", 0..8),
            0..4,
        ))| {
            let mut spec = LanguageSpec::new("Prop");
            for (i, words) in groups.iter().enumerate() {
                spec = spec.group(GroupSpec::new(format!("g{}", i), words.clone()));
            }
            let lang = LanguageDefinition::build(spec);
            for keyword in lang.keywords() {
                for ch in keyword.text.chars() {
                    prop_assert!(!lang.is_operator(ch));
                    prop_assert!(!lang.is_punctuation(ch));
                }
            }
        });
    }

    #[test]
    fn test_property_every_word_resolves_to_its_first_group() {
        use proptest::prelude::*;

        proptest!(|(groups in prop::collection::vec(
            prop::collection::vec("[a-d]{1,3}", 1..6),
            1..4,
        ))| {
            let mut spec = LanguageSpec::new("Prop");
            for (i, words) in groups.iter().enumerate() {
                spec = spec.group(GroupSpec::new(format!("g{}", i), words.clone()));
            }
            let lang = LanguageDefinition::build(spec);
            for (i, words) in groups.iter().enumerate() {
                for word in words {
                    let first = groups.iter().position(|g| g.contains(word)).unwrap();
                    prop_assert!(first <= i);
                    prop_assert_eq!(lang.lookup_keyword(word), Some(GroupId(first as u32)));
                }
            }
        });
    }

    #[test]
    fn test_property_compiled_format_reproduces_definition() {
        use proptest::prelude::*;

        proptest!(|(
            name in "[A-Za-z][A-Za-z +#]{0,10}",
            words in prop::collection::vec("[^\\s]{1,8}", 0..12),
            line_comment in proptest::option::of("[^\\s]{1,3}"),
        )| {
            let mut spec = LanguageSpec::new(name).group(GroupSpec::new("kw", words));
            if let Some(prefix) = line_comment {
                spec = spec.line_comment(prefix);
            }
            let lang = LanguageDefinition::build(spec);
            let parsed = parse_compiled(&write_compiled(&lang)).unwrap();
            prop_assert_eq!(parsed, lang);
        });
    }
}
