use index_images::app::catalog::load_catalog;
use index_images::app::export::render_image_list;
use index_images::app::extract::extract_images;
use index_images::app::selection::parse_selection;
use index_images::domain::model::CatalogFormat;
use insta::assert_snapshot;

const SELECTION: &str = "
  cluster-logging: stable-5.8
  local-storage-operator : stable
";

const RENDERED_INDEX: &str = r#"
{"schema":"olm.package","name":"cluster-logging","defaultChannel":"stable-5.8"}
{"schema":"olm.channel","package":"cluster-logging","name":"stable-5.7","entries":[{"name":"cluster-logging.v5.7.9"}]}
{"schema":"olm.channel","package":"cluster-logging","name":"stable-5.8","entries":[{"name":"cluster-logging.v5.8.1"},{"name":"cluster-logging.v5.8.2","replaces":"cluster-logging.v5.8.1"}]}
{"schema":"olm.bundle","name":"cluster-logging.v5.7.9","package":"cluster-logging","relatedImages":[{"name":"operator","image":"registry.example.com/logging/operator@sha256:57"}]}
{"schema":"olm.bundle","name":"cluster-logging.v5.8.2","package":"cluster-logging","relatedImages":[{"name":"operator","image":"registry.example.com/logging/operator@sha256:58"},{"name":"fluentd","image":"registry.example.com/logging/fluentd@sha256:58"}]}
{"schema":"olm.channel","package":"local-storage-operator","name":"stable","entries":[{"name":"local-storage-operator.v4.14.0"}]}
{"schema":"olm.bundle","name":"local-storage-operator.v4.14.0","package":"local-storage-operator","relatedImages":[{"name":"operator","image":"registry.example.com/lso/operator@sha256:414"},{"name":"diskmaker","image":"registry.example.com/lso/diskmaker@sha256:414"}]}
{"schema":"olm.channel","package":"ptp-operator","name":"stable","entries":[{"name":"ptp-operator.v4.14.0"}]}
{"schema":"olm.bundle","name":"ptp-operator.v4.14.0","package":"ptp-operator","relatedImages":[{"name":"operator","image":"registry.example.com/ptp/operator@sha256:414"}]}
"#;

#[test]
fn image_list_for_selected_channels() {
    let selection = parse_selection(SELECTION).expect("valid selection");
    let objects = load_catalog(RENDERED_INDEX, CatalogFormat::Json).expect("valid catalog");
    let images = extract_images(&selection, &objects).expect("extraction succeeds");

    assert_snapshot!(render_image_list(&images), @r"
    registry.example.com/logging/operator@sha256:58
    registry.example.com/logging/fluentd@sha256:58
    registry.example.com/lso/operator@sha256:414
    registry.example.com/lso/diskmaker@sha256:414
    ");
}

#[test]
fn yaml_catalog_yields_the_same_images() {
    let selection = parse_selection("p1:stable").expect("valid selection");
    let json = r#"{"schema":"olm.channel","package":"p1","name":"stable","entries":[{"name":"p1.v1"}]}
{"schema":"olm.bundle","name":"p1.v1","package":"p1","relatedImages":[{"image":"img-a"}]}"#;
    let yaml = "---
schema: olm.channel
package: p1
name: stable
entries:
- name: p1.v1
---
schema: olm.bundle
name: p1.v1
package: p1
relatedImages:
- image: img-a
";

    let from_json = extract_images(&selection, &load_catalog(json, CatalogFormat::Json).unwrap());
    let from_yaml = extract_images(&selection, &load_catalog(yaml, CatalogFormat::Yaml).unwrap());
    assert_eq!(from_json.unwrap(), from_yaml.unwrap());
}
