use semblocks::{extract, Block, BlockMeta, MetaRole, ValidationStatus};

#[test]
fn minimal_document_extracts_heading_and_paragraph() {
    let html = "<html><body><main><h1>Hi</h1><p>Hello world.</p></main></body></html>";
    let result = extract(html);

    assert_eq!(
        result.blocks,
        vec![Block::heading(1, "Hi"), Block::paragraph("Hello world.")]
    );
    assert_eq!(result.validation.status, ValidationStatus::Pass);
    assert_eq!(result.validation.h1_count, 1);
    assert!(result.validation.messages.is_empty());
}

#[test]
fn chrome_is_stripped() {
    let html = r#"
        <html><body>
            <nav><a href="/">Home</a></nav>
            <main><h1>T</h1></main>
            <footer>x</footer>
        </body></html>
    "#;
    let result = extract(html);
    assert_eq!(result.blocks, vec![Block::heading(1, "T")]);
}

#[test]
fn chrome_text_never_leaks_even_without_main() {
    let html = r#"
        <html><body>
            <header>SITE_HEADER_TEXT</header>
            <nav>MENU_TEXT</nav>
            <div class="content">
                <h1>Page Title</h1>
                <p>ARTICLE_BODY with enough running text to win the density score.</p>
            </div>
            <aside>SIDEBAR_TEXT</aside>
            <footer>FOOTER_TEXT</footer>
        </body></html>
    "#;
    let result = extract(html);
    let json = serde_json::to_string(&result).unwrap();
    assert!(json.contains("ARTICLE_BODY"));
    assert!(!json.contains("SITE_HEADER_TEXT"));
    assert!(!json.contains("MENU_TEXT"));
    assert!(!json.contains("SIDEBAR_TEXT"));
    assert!(!json.contains("FOOTER_TEXT"));
}

#[test]
fn hidden_content_never_appears() {
    let html = r#"
        <html><body><main>
            <h1>Visible</h1>
            <p class="sr-only">SCREEN_READER_ONLY</p>
            <p style="display:none">DISPLAY_NONE_TEXT</p>
            <div aria-hidden="true">tiny</div>
            <p>Visible paragraph stays in the output.</p>
        </main></body></html>
    "#;
    let result = extract(html);
    let json = serde_json::to_string(&result).unwrap();
    assert!(!json.contains("SCREEN_READER_ONLY"));
    assert!(!json.contains("DISPLAY_NONE_TEXT"));
    assert!(json.contains("Visible paragraph stays in the output."));
}

#[test]
fn empty_input_warns_instead_of_failing() {
    let result = extract("");
    assert!(result.blocks.is_empty());
    assert_eq!(result.validation.status, ValidationStatus::Warn);
    assert_eq!(result.validation.h1_count, 0);
    assert_eq!(
        result.validation.messages,
        vec!["No H1 found in extracted blocks."]
    );
}

#[test]
fn malformed_html_still_extracts() {
    let html = "<main><h1>Broken<p>Unclosed paragraph here.<div><span>loose";
    let result = extract(html);
    assert!(result
        .blocks
        .iter()
        .any(|b| matches!(b, Block::Heading { level: 1, .. })));
}

#[test]
fn pathological_nesting_terminates_and_caps_descent() {
    // 250 wrapper divs put the inner paragraph far past the walker's depth
    // guard: extraction must return normally, keep the shallow content,
    // and stop descending instead of chasing the buried subtree.
    let mut html = String::from("<html><body><main><h1>Deep Page</h1>");
    for _ in 0..250 {
        html.push_str("<div>");
    }
    html.push_str("<p>BURIED_SENTENCE far below the depth cap.</p>");
    for _ in 0..250 {
        html.push_str("</div>");
    }
    html.push_str("</main></body></html>");

    let result = extract(&html);
    assert_eq!(result.validation.h1_count, 1);
    assert!(result
        .blocks
        .iter()
        .any(|b| b.own_text() == Some("Deep Page")));
    let json = serde_json::to_string(&result).unwrap();
    assert!(!json.contains("BURIED_SENTENCE"));
}

#[test]
fn extraction_is_deterministic() {
    let html = r#"
        <html><head>
            <title>Determinism</title>
            <link rel="canonical" href="https://example.com/p/">
        </head><body><main>
            <h1>Stable</h1>
            <p>Exactly the same output, byte for byte.</p>
            <ul><li>First item text</li><li>Second item text</li></ul>
            <details><summary>What is this?</summary><p>A determinism check.</p></details>
        </main></body></html>
    "#;
    let first = serde_json::to_string_pretty(&extract(html)).unwrap();
    let second = serde_json::to_string_pretty(&extract(html)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn multiple_h1_keeps_first_and_warns() {
    let html = r#"
        <html><body><main>
            <h1>First Title</h1>
            <p>Some body text between the titles.</p>
            <h1>Second Title</h1>
        </main></body></html>
    "#;
    let result = extract(html);
    assert_eq!(result.validation.status, ValidationStatus::Warn);
    assert_eq!(result.validation.h1_count, 1);
    assert_eq!(
        result.validation.messages,
        vec!["Multiple H1 headings found (2). Kept the first."]
    );
    let h1_texts: Vec<&str> = result
        .blocks
        .iter()
        .filter_map(|b| match b {
            Block::Heading { level: 1, text } => Some(text.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(h1_texts, vec!["First Title"]);
}

#[test]
fn source_metadata_is_populated() {
    let html = r#"
        <html><head>
            <title>Acme Pest Control</title>
            <link rel="canonical" href="https://acme.example/services/">
            <meta name="description" content="Fast local service.">
        </head><body><main><h1>Services</h1></main></body></html>
    "#;
    let result = extract(html);
    assert_eq!(result.source.title, "Acme Pest Control");
    assert_eq!(result.source.url, "https://acme.example/services/");
    assert_eq!(result.source.canonical, "https://acme.example/services/");
    assert_eq!(result.source.meta_description, "Fast local service.");
}

#[test]
fn eyebrow_paragraph_is_annotated_by_default() {
    let html = r#"
        <html><body><main>
            <h1>X</h1>
            <p>NEW FOR 2024</p>
            <h2>Launch</h2>
        </main></body></html>
    "#;
    let result = extract(html);
    assert_eq!(
        result.blocks[1],
        Block::Paragraph {
            text: "NEW FOR 2024".into(),
            meta: Some(BlockMeta {
                role: MetaRole::Eyebrow
            }),
        }
    );
}

#[test]
fn lists_require_two_items() {
    let html = r#"
        <html><body><main>
            <h1>L</h1>
            <ul><li>Only item in this list</li></ul>
            <ul><li>First real item</li><li>Second real item</li></ul>
        </main></body></html>
    "#;
    let result = extract(html);
    let lists: Vec<&Block> = result
        .blocks
        .iter()
        .filter(|b| matches!(b, Block::List { .. }))
        .collect();
    assert_eq!(lists.len(), 1);
    let Block::List { ordered, items } = lists[0] else {
        unreachable!()
    };
    assert!(!ordered);
    assert_eq!(items, &["First real item", "Second real item"]);
}

#[test]
fn ordered_lists_keep_their_order_flag() {
    let html = r#"
        <html><body><main>
            <h1>Steps</h1>
            <ol><li>Inspect the property</li><li>Treat the perimeter</li></ol>
        </main></body></html>
    "#;
    let result = extract(html);
    assert!(result
        .blocks
        .iter()
        .any(|b| matches!(b, Block::List { ordered: true, .. })));
}

#[test]
fn tables_extract_row_major() {
    let html = r#"
        <html><body><main>
            <h1>Pricing</h1>
            <table>
                <tr><th>Plan</th><th>Price</th></tr>
                <tr><td>Basic</td><td>$49</td></tr>
            </table>
        </main></body></html>
    "#;
    let result = extract(html);
    let table = result
        .blocks
        .iter()
        .find(|b| matches!(b, Block::Table { .. }))
        .unwrap();
    let Block::Table { rows } = table else {
        unreachable!()
    };
    assert_eq!(
        rows,
        &vec![
            vec!["Plan".to_string(), "Price".to_string()],
            vec!["Basic".to_string(), "$49".to_string()],
        ]
    );
}

#[test]
fn elementor_text_editor_div_becomes_one_paragraph() {
    let html = r#"
        <html><body><main>
            <h1>W</h1>
            <div class="elementor-widget-text-editor">
                <p>First sentence of the widget.</p>
                <p>Second sentence of the widget.</p>
            </div>
        </main></body></html>
    "#;
    let result = extract(html);
    assert_eq!(
        result.blocks[1],
        Block::paragraph("First sentence of the widget. Second sentence of the widget.")
    );
}

#[test]
fn elementor_icon_list_uses_text_spans() {
    let html = r#"
        <html><body><main>
            <h1>Services</h1>
            <ul class="elementor-icon-list-items">
                <li>
                    <span class="elementor-icon-list-icon"><svg></svg></span>
                    <span class="elementor-icon-list-text">Termite control</span>
                </li>
                <li>
                    <span class="elementor-icon-list-icon"><svg></svg></span>
                    <span class="elementor-icon-list-text">Rodent removal</span>
                </li>
            </ul>
        </main></body></html>
    "#;
    let result = extract(html);
    let Block::List { items, .. } = &result.blocks[1] else {
        panic!("expected list, got {:?}", result.blocks[1]);
    };
    assert_eq!(items, &["Termite control", "Rodent removal"]);
}

#[test]
fn alt_text_like_paragraphs_are_filtered() {
    let html = r#"
        <html><body><main>
            <h1>Gallery</h1>
            <p>Image of a technician spraying a baseboard</p>
            <p>Real copy about the service, written for people.</p>
        </main></body></html>
    "#;
    let result = extract(html);
    let paragraphs: Vec<&Block> = result
        .blocks
        .iter()
        .filter(|b| matches!(b, Block::Paragraph { .. }))
        .collect();
    assert_eq!(paragraphs.len(), 1);
    assert_eq!(
        paragraphs[0].own_text(),
        Some("Real copy about the service, written for people.")
    );
}
