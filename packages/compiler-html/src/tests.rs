use crate::{compile_to_html, CompileError, CompileOptions, Orientation, PageSetup};
use profile_schema::{ProfileData, DEFAULT_CONTACT_FOOTER_TEXT};
use std::sync::Arc;

fn render(doc: &ProfileData, options: CompileOptions) -> String {
    compile_to_html(doc, options).expect("Failed to compile")
}

#[test]
fn test_sections_in_page_order() {
    let html = render(&ProfileData::default(), CompileOptions::default());

    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("@page { size: A4 portrait; margin: 0mm; }"));

    let ids = [
        "hero",
        "about",
        "ceoMessage",
        "visionMission",
        "values",
        "services",
        "workProcess",
        "contact",
    ];
    let positions: Vec<usize> = ids
        .iter()
        .map(|id| {
            html.find(&format!("id=\"{}\"", id))
                .unwrap_or_else(|| panic!("missing section {}", id))
        })
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(html.matches("class=\"page-section").count(), 8);
}

#[test]
fn test_text_is_escaped() {
    let mut doc = ProfileData::default();
    Arc::make_mut(&mut doc.hero).brand_name = "<script>alert('x')</script> & co".to_string();
    Arc::make_mut(&mut doc.ceo_message).text = "line one\nline two".to_string();

    let html = render(&doc, CompileOptions::default());
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt; &amp; co"));
    assert!(html.contains("line one<br>line two"));
}

#[test]
fn test_edit_mode_carries_paths_and_controls() {
    let html = render(&ProfileData::default(), CompileOptions::default());

    assert!(html.contains("data-path=\"hero.brandName\""));
    assert!(html.contains("data-path=\"services.items.1.title\""));
    assert!(html.contains("data-path=\"workProcess.items.0.points.0\""));
    assert!(html.contains("data-action=\"add-item\""));
    assert!(html.contains("image-placeholder"));
    // Contact cards are not links while editing
    assert!(!html.contains("mailto:"));
}

#[test]
fn test_view_mode_links_and_no_edit_hooks() {
    let html = render(&ProfileData::default(), CompileOptions::view());

    assert!(!html.contains("data-path="));
    assert!(!html.contains("edit-control"));
    assert!(!html.contains("image-placeholder"));

    assert!(html.contains("href=\"mailto:hello@tivro.sa\""));
    assert!(html.contains("href=\"https://wa.me/966500000000\""));
    assert!(html.contains("href=\"https://www.tivro.sa\""));
    assert!(html.contains("href=\"https://www.tiktok.com/@tivro\""));
    assert!(html.contains("href=\"https://www.snapchat.com/add/tivro\""));
    assert!(html.contains("href=\"https://www.instagram.com/tivro\""));
    assert_eq!(html.matches("clickable-link").count(), 7);
}

#[test]
fn test_service_lead_and_bullets() {
    let doc = ProfileData::default();
    let html = render(&doc, CompileOptions::view());
    let first = &doc.services.items[0];

    assert!(html.contains(&format!("<p class=\"lead\">{}</p>", first.points[0])));
    for bullet in first.bullets() {
        assert!(html.contains(&format!("<li class=\"point\">{}</li>", bullet)));
    }
}

#[test]
fn test_footer_rules() {
    let mut doc = ProfileData::default();
    let html = render(&doc, CompileOptions::default());
    assert!(html.contains("class=\"profile-footer\""));
    assert!(html.contains(DEFAULT_CONTACT_FOOTER_TEXT));

    let contact = Arc::make_mut(&mut doc.contact);
    contact.show_footer = Some(false);
    contact.footer_text = Some("Custom intro".to_string());

    let html = render(&doc, CompileOptions::default());
    assert!(!html.contains("class=\"profile-footer\""));
    assert!(html.contains("data-action=\"show-footer\""));
    assert!(html.contains("Custom intro"));

    let html = render(&doc, CompileOptions::view());
    assert!(!html.contains("show-footer"));
}

#[test]
fn test_images_are_inlined() {
    let mut doc = ProfileData::default();
    Arc::make_mut(&mut doc.hero).logo = Some("data:image/png;base64,AA==".to_string());

    let html = render(&doc, CompileOptions::view());
    assert!(html.contains("<img class=\"hero-logo\" src=\"data:image/png;base64,AA==\" alt=\"\" />"));
}

#[test]
fn test_unsafe_image_is_rejected() {
    let mut doc = ProfileData::default();
    Arc::make_mut(&mut doc.vision_mission).main_image = Some("javascript:alert(1)".to_string());

    let err = compile_to_html(&doc, CompileOptions::default()).unwrap_err();
    assert!(matches!(
        err,
        CompileError::InvalidImage { ref path, .. } if path == "visionMission.mainImage"
    ));
}

#[test]
fn test_page_setup_reaches_css() {
    let options = CompileOptions {
        page: PageSetup {
            orientation: Orientation::Landscape,
            margin_mm: 5.0,
            break_selector: ".services, .contact".to_string(),
        },
        ..CompileOptions::view()
    };
    let html = render(&ProfileData::default(), options);

    assert!(html.contains("@page { size: A4 landscape; margin: 5mm; }"));
    assert!(html.contains(".profile-container { width: 1123px;"));
    assert!(html.contains(".services, .contact { break-before: page;"));
    assert!(!html.contains(".page-section { break-before"));
}

#[test]
fn test_compact_output() {
    let options = CompileOptions {
        pretty: false,
        ..CompileOptions::default()
    };
    let html = render(&ProfileData::default(), options);
    assert!(!html.contains('\n'));
}
