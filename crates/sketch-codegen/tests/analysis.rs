//! End-to-end classification of small canvases.

use sketch_codegen::{
    AnalyzerConfig, ComponentMapping, ComponentType, DesignAnalyzer, ProjectOptions, PropValue,
};
use sketch_core::{CanvasObject, CanvasSize, FontWeight, NodeId, SceneGraph};

fn scene(objects: Vec<CanvasObject>) -> SceneGraph {
    SceneGraph::from_objects(&objects, CanvasSize::new(1200.0, 800.0))
}

fn submit_button() -> CanvasObject {
    CanvasObject::group(vec![
        CanvasObject::rect(100.0, 400.0, 160.0, 48.0)
            .with_fill("#111827")
            .with_radius(8.0),
        CanvasObject::text(150.0, 412.0, "Submit"),
    ])
}

fn text_field(y: f64) -> CanvasObject {
    CanvasObject::rect(100.0, y, 300.0, 40.0)
        .with_fill("#FFFFFF")
        .with_stroke("#D1D5DB", 1.0)
}

fn types(components: &[ComponentMapping]) -> Vec<ComponentType> {
    components.iter().map(|c| c.component_type).collect()
}

fn dashboard_bar(fill: Option<&str>) -> CanvasObject {
    let mut bar = CanvasObject::rect(0.0, 0.0, 1200.0, 64.0).with_stroke("#E5E7EB", 1.0);
    if let Some(fill) = fill {
        bar = bar.with_fill(fill);
    }
    CanvasObject::group(vec![bar, CanvasObject::text(24.0, 20.0, "Dashboard")])
}

fn get_started_button() -> CanvasObject {
    CanvasObject::group(vec![
        CanvasObject::rect(100.0, 200.0, 200.0, 56.0)
            .with_fill("#111827")
            .with_radius(8.0),
        CanvasObject::text(140.0, 216.0, "Get Started"),
    ])
}

#[test]
fn navbar_then_primary_button() {
    let graph = scene(vec![dashboard_bar(None), get_started_button()]);
    let analyzer = DesignAnalyzer::new();
    let components = analyzer.analyze(&graph);

    assert_eq!(types(&components), vec![ComponentType::Navbar, ComponentType::Button]);
    assert_eq!(
        components[0].prop("items"),
        Some(&PropValue::from(vec!["Dashboard".to_string()]))
    );
    let button = &components[1];
    assert_eq!(button.prop_str("label"), Some("Get Started"));
    assert_eq!(button.prop_str("variant"), Some("primary"));
    assert!(button.code.contains("bg-gray-900 text-white"));
    assert!(button.code.contains(">Get Started</button>"));
    assert!(button.children.is_empty());

    let app = analyzer.generate_application(&graph).unwrap();
    let nav = app.find("<nav").unwrap();
    let cta = app.find(">Get Started</button>").unwrap();
    assert!(nav < cta);
    assert!(app.contains(">Dashboard</a>"));
}

#[test]
fn filled_bar_with_text_reads_as_card() {
    // Card is checked before navbar, so a filled background plus text wins as a card.
    let graph = scene(vec![dashboard_bar(Some("#111827")), get_started_button()]);
    let components = DesignAnalyzer::new().analyze(&graph);

    assert_eq!(types(&components), vec![ComponentType::Card, ComponentType::Button]);
    assert_eq!(components[0].prop_str("title"), Some("Dashboard"));
}

#[test]
fn named_fill_makes_secondary_button() {
    let graph = scene(vec![CanvasObject::rect(100.0, 300.0, 160.0, 48.0)
        .with_fill("red")
        .with_radius(8.0)]);
    let components = DesignAnalyzer::new().analyze(&graph);

    assert_eq!(types(&components), vec![ComponentType::Button]);
    assert_eq!(components[0].prop_str("variant"), Some("secondary"));
    assert_eq!(components[0].prop_str("background"), Some("#FF0000"));
}

#[test]
fn named_fill_counts_as_card_background() {
    let graph = scene(vec![CanvasObject::group(vec![
        CanvasObject::rect(100.0, 200.0, 300.0, 200.0).with_fill("lightgray"),
        CanvasObject::text(120.0, 220.0, "Plan"),
    ])]);
    let components = DesignAnalyzer::new().analyze(&graph);
    assert_eq!(types(&components), vec![ComponentType::Card]);
}

#[test]
fn named_stroke_counts_for_input() {
    let graph = scene(vec![CanvasObject::rect(100.0, 300.0, 300.0, 40.0)
        .with_fill("#FFFFFF")
        .with_stroke("gray", 1.0)]);
    let components = DesignAnalyzer::new().analyze(&graph);
    assert_eq!(types(&components), vec![ComponentType::Input]);
}

#[test]
fn button_wins_over_card() {
    let graph = scene(vec![submit_button()]);
    let components = DesignAnalyzer::new().analyze(&graph);

    assert_eq!(types(&components), vec![ComponentType::Button]);
    // The button claims its background and label; neither resurfaces.
    assert_eq!(components[0].provenance, vec![NodeId(0), NodeId(1), NodeId(2)]);
}

#[test]
fn card_with_title_description_and_image() {
    let graph = scene(vec![CanvasObject::group(vec![
        CanvasObject::rect(100.0, 200.0, 320.0, 360.0).with_fill("#FFFFFF"),
        CanvasObject::image(100.0, 200.0, 320.0, 180.0, "hero.png"),
        CanvasObject::text(120.0, 400.0, "Starter plan").with_font_size(22.0),
        CanvasObject::text(120.0, 440.0, "Everything to get going").with_font_size(14.0),
    ])]);
    let components = DesignAnalyzer::new().analyze(&graph);

    assert_eq!(types(&components), vec![ComponentType::Card]);
    let card = &components[0];
    assert_eq!(card.prop_str("title"), Some("Starter plan"));
    assert_eq!(card.prop_str("description"), Some("Everything to get going"));
    assert_eq!(card.prop_str("image"), Some("hero.png"));
    assert_eq!(card.provenance.len(), 5);
}

#[test]
fn input_types_follow_labels() {
    let cases = [
        ("Email", "email"),
        ("Email Address", "email"),
        ("Password", "password"),
        ("Amount", "number"),
        ("Name", "text"),
    ];
    for (label, expected) in cases {
        let graph = scene(vec![
            CanvasObject::text(100.0, 110.0, label),
            text_field(140.0),
        ]);
        let components = DesignAnalyzer::new().analyze(&graph);

        assert_eq!(
            types(&components),
            vec![ComponentType::Text, ComponentType::Input],
            "label {label:?}"
        );
        let input = &components[1];
        assert_eq!(input.prop_str("type"), Some(expected), "label {label:?}");
        assert_eq!(input.prop_str("placeholder"), Some(label));
        assert_eq!(input.provenance, vec![NodeId(1)]);
    }
}

#[test]
fn input_without_label_uses_placeholder_default() {
    let graph = scene(vec![text_field(300.0)]);
    let components = DesignAnalyzer::new().analyze(&graph);
    assert_eq!(components[0].prop_str("placeholder"), Some("Enter text..."));
    assert_eq!(components[0].prop_str("type"), Some("text"));
}

#[test]
fn navbar_group_collects_items() {
    let graph = scene(vec![CanvasObject::group(vec![
        CanvasObject::text(900.0, 20.0, "Pricing"),
        CanvasObject::text(1000.0, 20.0, "Docs"),
    ])
    .with_bounds(0.0, 0.0, 1200.0, 64.0)
    .with_fill("#FFFFFF")]);
    let components = DesignAnalyzer::new().analyze(&graph);

    assert_eq!(types(&components), vec![ComponentType::Navbar]);
    assert_eq!(components[0].prop_str("brand"), Some("Brand"));
    assert_eq!(
        components[0].prop("items"),
        Some(&PropValue::from(vec!["Pricing".to_string(), "Docs".to_string()]))
    );
}

#[test]
fn generic_fallback_by_font() {
    let graph = scene(vec![
        CanvasObject::text(100.0, 200.0, "Welcome").with_font_size(40.0),
        CanvasObject::text(100.0, 260.0, "Plain copy").with_font_size(20.0),
        CanvasObject::text(100.0, 300.0, "Bold copy").with_font_weight(FontWeight::Numeric(700.0)),
        CanvasObject::ellipse(600.0, 400.0, 48.0, 48.0).with_fill("#F59E0B"),
    ]);
    let components = DesignAnalyzer::new().analyze(&graph);

    let tags: Vec<_> = components.iter().filter_map(|c| c.prop_str("tag")).collect();
    assert_eq!(tags, vec!["h1", "p", "strong"]);
    assert!(components[0].code.starts_with("<h1"));

    let dot = &components[3];
    assert_eq!(dot.component_type, ComponentType::Container);
    assert_eq!(dot.prop_str("shape"), Some("ellipse"));
    assert!(dot.code.contains("rounded-full"));
}

#[test]
fn malformed_geometry_defaults_to_zero() {
    let mut broken = CanvasObject::rect(f64::NAN, 300.0, f64::INFINITY, 40.0);
    broken.font_size = Some(f64::NAN);
    let graph = scene(vec![broken]);
    let components = DesignAnalyzer::new().analyze(&graph);

    assert_eq!(components.len(), 1);
    assert_eq!(components[0].bounds.x, 0.0);
    assert_eq!(components[0].bounds.width, 0.0);
}

#[test]
fn reads_canvas_json() {
    let json = r##"{
        "width": 1200,
        "height": 800,
        "objects": [
            {"type": "rect", "left": 0, "top": 0, "width": 1200, "height": 64, "fill": "#111827"},
            {"type": "i-text", "left": 100, "top": 200, "text": "Welcome", "fontSize": 40},
            {"type": "rect", "left": 100, "top": 300, "width": 160, "height": 48, "rx": 8,
             "fill": {"type": "linear", "colorStops": []}}
        ]
    }"##;
    let components = DesignAnalyzer::new().analyze_json(json).unwrap();

    assert_eq!(
        types(&components),
        vec![ComponentType::Navbar, ComponentType::Text, ComponentType::Button]
    );
    // Gradient fills are unreadable and treated as no fill.
    assert_eq!(components[2].prop_str("variant"), Some("outline"));
}

#[test]
fn rejects_malformed_json() {
    assert!(DesignAnalyzer::new().analyze_json("{\"objects\": 3}").is_err());
}

#[test]
fn application_lists_components_in_order() {
    let graph = scene(vec![
        CanvasObject::rect(0.0, 0.0, 1200.0, 64.0).with_fill("#111827"),
        CanvasObject::text(100.0, 200.0, "Welcome").with_font_size(40.0),
        submit_button(),
    ]);
    let app = DesignAnalyzer::new().generate_application(&graph).unwrap();

    assert!(app.contains("export default function App()"));
    let nav = app.find("<nav").unwrap();
    let heading = app.find("<h1").unwrap();
    let button = app.find("<button").unwrap();
    assert!(nav < heading && heading < button);
    assert!(app.contains("      <h1 className=\"text-4xl font-bold text-gray-900\">Welcome</h1>"));
}

#[test]
fn row_grouping_is_opt_in() {
    let objects = vec![
        CanvasObject::rect(100.0, 300.0, 160.0, 48.0).with_radius(8.0),
        CanvasObject::rect(300.0, 302.0, 160.0, 44.0).with_radius(8.0),
    ];
    let graph = scene(objects);

    let flat = DesignAnalyzer::new().analyze(&graph);
    assert_eq!(types(&flat), vec![ComponentType::Button, ComponentType::Button]);

    let config = AnalyzerConfig {
        group_rows: true,
        ..AnalyzerConfig::default()
    };
    let grouped = DesignAnalyzer::try_with_config(config).unwrap().analyze(&graph);
    assert_eq!(types(&grouped), vec![ComponentType::Container]);
    assert_eq!(grouped[0].prop_str("layout"), Some("row"));
    assert_eq!(types(&grouped[0].children), vec![ComponentType::Button, ComponentType::Button]);
    assert!(grouped[0].code.starts_with("<div className=\"flex flex-row items-center gap-4\">"));
}

#[test]
fn invalid_config_is_rejected() {
    let config = AnalyzerConfig {
        navbar_min_width_ratio: 1.5,
        ..AnalyzerConfig::default()
    };
    assert!(DesignAnalyzer::try_with_config(config).is_err());
}

#[test]
fn project_skeleton_files() {
    let graph = scene(vec![submit_button()]);
    let options = ProjectOptions {
        name: "Checkout Form".to_string(),
        ..ProjectOptions::default()
    };
    let project = DesignAnalyzer::new().generate_project(&graph, &options).unwrap();

    let paths: Vec<_> = project.files.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(paths, vec!["package.json", "tailwind.config.js", "src/App.jsx"]);
    assert!(project.file("package.json").unwrap().content.contains("\"name\": \"checkout-form\""));
    assert!(project.file("src/App.jsx").unwrap().content.contains(">Submit</button>"));
}
