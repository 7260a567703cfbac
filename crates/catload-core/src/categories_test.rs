use std::io::Write;

use super::*;

fn seed(name: &str, parent: Option<&str>) -> CategorySeed {
    CategorySeed {
        name: name.to_string(),
        slug: None,
        description: String::new(),
        icon: String::new(),
        parent: parent.map(str::to_string),
        banner_image: None,
        banner_title: None,
        banner_subtitle: None,
    }
}

#[test]
fn slugify_simple_name() {
    assert_eq!(slugify("Editing Software"), "editing-software");
}

#[test]
fn slugify_strips_symbols() {
    assert_eq!(slugify("Disney+ Hotstar"), "disney-hotstar");
}

#[test]
fn slugify_collapses_repeated_separators() {
    assert_eq!(slugify("  AI  -  Tools "), "ai-tools");
}

#[test]
fn slugify_keeps_non_ascii_letters() {
    assert_eq!(slugify("Ünïcode TV"), "ünïcode-tv");
    assert_eq!(slugify("सोनी लिव"), "सोनी-लिव");
    assert_eq!(slugify("हॉटस्टार"), "हॉटस्टार");
    assert_ne!(slugify("सोनी लिव"), slugify("हॉटस्टार"));
}

#[test]
fn slugify_symbols_only_is_empty() {
    assert_eq!(slugify("+++"), "");
    assert_eq!(slugify(" ! "), "");
}

#[test]
fn non_ascii_slug_passes_seed_validation() {
    let mut s = seed("सोनी लिव", None);
    s.slug = Some(slugify("सोनी लिव"));
    assert_eq!(s.slug.as_deref(), Some("सोनी-लिव"));
    assert!(validate_categories(&CategoriesFile { categories: vec![s] }).is_ok());
}

#[test]
fn platform_subcategory_shape() {
    let record = CategoryRecord::platform_subcategory("Amazon Prime", "cat-1");
    assert_eq!(record.slug, "amazon-prime");
    assert_eq!(record.description, "Amazon Prime subscription plans");
    assert_eq!(record.icon, "fas fa-layer-group");
    assert_eq!(record.parent_category_id.as_deref(), Some("cat-1"));
    assert!(record.is_subcategory);
    assert!(record.id.is_none());
}

#[test]
fn category_record_serializes_camel_case_and_omits_missing_id() {
    let record = CategoryRecord::top_level("OTT Subscriptions", "ott-subscriptions", "", "fas fa-tv");
    let value = serde_json::to_value(&record).unwrap();
    assert!(value.get("id").is_none());
    assert_eq!(value["isSubcategory"], false);
    assert!(value["parentCategoryId"].is_null());
}

#[test]
fn top_level_seed_uses_slug_as_id() {
    let record = seed("AI Tools", None).to_record(None);
    assert_eq!(record.id.as_deref(), Some("ai-tools"));
    assert!(!record.is_subcategory);
}

#[test]
fn sub_seed_carries_parent_id() {
    let record = seed("OpenAI", Some("ai-tools")).to_record(Some("ai-tools"));
    assert!(record.id.is_none());
    assert_eq!(record.parent_category_id.as_deref(), Some("ai-tools"));
    assert!(record.is_subcategory);
}

#[test]
fn validate_rejects_duplicate_slugs() {
    let file = CategoriesFile {
        categories: vec![seed("AI Tools", None), seed("AI tools", None)],
    };
    let err = validate_categories(&file).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(ref m) if m.contains("duplicate")));
}

#[test]
fn validate_rejects_empty_name() {
    let file = CategoriesFile {
        categories: vec![seed("  ", None)],
    };
    assert!(validate_categories(&file).is_err());
}

#[test]
fn validate_rejects_non_slug_override() {
    let mut bad = seed("AI Tools", None);
    bad.slug = Some("AI Tools".to_string());
    let file = CategoriesFile {
        categories: vec![bad],
    };
    let err = validate_categories(&file).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(ref m) if m.contains("invalid slug")));
}

#[test]
fn validate_rejects_three_level_tree() {
    let file = CategoriesFile {
        categories: vec![
            seed("Software", None),
            seed("Adobe", Some("software")),
            seed("Photoshop", Some("adobe")),
        ],
    };
    let err = validate_categories(&file).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(ref m) if m.contains("itself a subcategory")));
}

#[test]
fn validate_accepts_parent_not_in_file() {
    let file = CategoriesFile {
        categories: vec![seed("Netflix", Some("ott-subscriptions"))],
    };
    assert!(validate_categories(&file).is_ok());
}

#[test]
fn load_categories_from_yaml() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "categories:\n  - name: Editing Software\n    description: Professional video and photo editing software\n    icon: fas fa-edit\n  - name: Adobe\n    parent: editing-software\n"
    )
    .unwrap();

    let loaded = load_categories(file.path()).unwrap();
    assert_eq!(loaded.categories.len(), 2);
    assert_eq!(loaded.top_level().count(), 1);
    assert_eq!(loaded.subcategories().count(), 1);
    assert_eq!(loaded.categories[0].slug(), "editing-software");
}

#[test]
fn load_categories_missing_file_is_io_error() {
    let err = load_categories(Path::new("/nonexistent/categories.yaml")).unwrap_err();
    assert!(matches!(err, ConfigError::FileIo { .. }));
}

#[test]
fn load_categories_rejects_unknown_keys() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "categories:\n  - name: X\n    colour: red\n").unwrap();
    let err = load_categories(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::FileParse { .. }));
}

#[test]
fn load_categories_from_real_file() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("config")
        .join("categories.yaml");
    assert!(path.exists(), "categories.yaml missing at {path:?}");
    let file = load_categories(&path).expect("failed to load categories.yaml");
    assert!(file.top_level().any(|c| c.slug() == "ott"));
    for seed in file.subcategories() {
        let parent = seed.parent.as_deref().unwrap_or_default();
        assert!(
            file.top_level().any(|c| c.slug() == parent),
            "subcategory '{}' should name a top-level parent in the same file",
            seed.name
        );
    }
}
