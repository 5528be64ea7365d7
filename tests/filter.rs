use formwork::dropdown::filter_options;

#[derive(Debug, Clone, PartialEq)]
struct Opt {
    id: i64,
    label: &'static str,
}

fn label_of(option: &Opt) -> String {
    option.label.to_string()
}

fn opts() -> Vec<Opt> {
    vec![
        Opt { id: 1, label: "Alpha" },
        Opt { id: 2, label: "Beta" },
        Opt { id: 3, label: "Gamma" },
        Opt { id: 4, label: "Alphabet" },
    ]
}

#[test]
fn test_empty_query_returns_all() {
    let options = opts();
    let hits = filter_options(&options, "", &label_of);
    assert_eq!(hits, vec![0, 1, 2, 3]);
}

#[test]
fn test_whitespace_query_returns_all() {
    let options = opts();
    let hits = filter_options(&options, "   ", &label_of);
    assert_eq!(hits, vec![0, 1, 2, 3]);
}

#[test]
fn test_substring_match_case_insensitive() {
    let options = opts();
    let hits = filter_options(&options, "ALPHA", &label_of);
    assert_eq!(hits, vec![0, 3]);
}

#[test]
fn test_beta_scenario() {
    let options = vec![
        Opt { id: 1, label: "Alpha" },
        Opt { id: 2, label: "Beta" },
    ];
    let hits = filter_options(&options, "bet", &label_of);
    assert_eq!(hits, vec![1]);
    assert_eq!(options[hits[0]].id, 2);
}

#[test]
fn test_no_matches() {
    let options = opts();
    let hits = filter_options(&options, "zzz", &label_of);
    assert!(hits.is_empty());
}

#[test]
fn test_query_is_trimmed() {
    let options = opts();
    let hits = filter_options(&options, "  beta  ", &label_of);
    assert_eq!(hits, vec![1]);
}

#[test]
fn test_result_is_ordered_subsequence() {
    let options = opts();
    // every query must yield indices that are strictly increasing and
    // whose labels contain the query case-insensitively
    for query in ["a", "al", "b", "ma", "t", ""] {
        let hits = filter_options(&options, query, &label_of);
        for pair in hits.windows(2) {
            assert!(pair[0] < pair[1], "order not preserved for {query:?}");
        }
        for &idx in &hits {
            assert!(
                options[idx]
                    .label
                    .to_lowercase()
                    .contains(&query.trim().to_lowercase()),
                "label {:?} does not contain {query:?}",
                options[idx].label
            );
        }
    }
}
