use k2_naming_cli::commands::convert;

fn names(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[test]
fn convert_pairs_names_with_snake_case() {
    let converted = convert::convert(&names(&["imageURL", "URLForImage", "a11"]));
    assert_eq!(
        converted,
        vec![
            ("imageURL".to_string(), "image_url".to_string()),
            ("URLForImage".to_string(), "url_for_image".to_string()),
            ("a11".to_string(), "a_11".to_string()),
        ]
    );
}

#[test]
fn convert_skips_blank_names() {
    let converted = convert::convert(&names(&["", "  ", "aB"]));
    assert_eq!(converted, vec![("aB".to_string(), "a_b".to_string())]);
}

#[test]
fn run_without_names_fails() {
    let err = convert::run(&names(&[" "])).unwrap_err();
    assert_eq!(err.to_string(), "no names given");
}

#[test]
fn run_prints_names() {
    assert!(convert::run(&names(&["PurchaseOrder"])).is_ok());
}
