use mdattrs_markdown::extract_attrs_from_title;
use proptest::prelude::*;

/// A single attribute, with or without a value.
fn attribute() -> impl Strategy<Value = String> {
    let name = "[_:a-zA-Z][-.0-9_:a-zA-Z]{0,8}";
    let value = prop_oneof![
        "[-.0-9_:a-zA-Z]{1,8}",
        "'[^'>]{0,8}'",
        "\"[^\">]{0,8}\"",
    ];
    (name, proptest::option::of(value)).prop_map(|(name, value)| match value {
        Some(value) => format!("{name}={value}"),
        None => name,
    })
}

fn attribute_list() -> impl Strategy<Value = String> {
    prop::collection::vec(attribute(), 0..4).prop_map(|attrs| attrs.join(" "))
}

/// Human title text that never contains `<`.
fn title_text() -> impl Strategy<Value = String> {
    "[A-Za-z0-9 ,.!?'-]{0,24}"
}

proptest! {
    #[test]
    fn never_panics(s in ".*") {
        let ex = extract_attrs_from_title(Some(&s));
        if let Some(title) = ex.title {
            prop_assert!(s.starts_with(title));
        }
    }

    #[test]
    fn plain_titles_pass_through(s in "[^<=]{0,40}") {
        let ex = extract_attrs_from_title(Some(&s));
        prop_assert_eq!(ex.into_parts(), (None, Some(s.as_str())));
    }

    #[test]
    fn bracketed_split(title in title_text(), attrs in attribute_list()) {
        let input = format!("{title} <{attrs}>");
        let ex = extract_attrs_from_title(Some(&input));
        let expected_title = Some(title.trim_end()).filter(|t| !t.is_empty());
        prop_assert_eq!(ex.attrs, Some(attrs.as_str()));
        prop_assert_eq!(ex.title, expected_title);
    }

    #[test]
    fn bracketed_split_is_stable(title in title_text(), attrs in attribute_list()) {
        let input = format!("{title} <{attrs}>");
        let first = extract_attrs_from_title(Some(&input));

        let rebuilt = match first.title {
            Some(t) => format!("{t} <{}>", first.attrs.unwrap_or_default()),
            None => format!("<{}>", first.attrs.unwrap_or_default()),
        };
        let second = extract_attrs_from_title(Some(&rebuilt));
        prop_assert_eq!(first, second);
    }
}
