use semblocks::{extract, Block, BlockMeta, MetaRole};

fn ctas(blocks: &[Block]) -> Vec<&Block> {
    blocks
        .iter()
        .filter(|b| matches!(b, Block::Cta { .. }))
        .collect()
}

#[test]
fn fragment_cta_is_kept_and_marked_router() {
    let html = r##"
        <html><body><main>
            <h1>P</h1>
            <a class="btn" href="#quote">Get quote</a>
        </main></body></html>
    "##;
    let result = extract(html);
    assert_eq!(
        result.blocks,
        vec![
            Block::heading(1, "P"),
            Block::Cta {
                text: "Get quote".into(),
                href: Some("#quote".into()),
                meta: Some(BlockMeta {
                    role: MetaRole::Router
                }),
            },
        ]
    );
}

#[test]
fn bare_hash_and_javascript_hrefs_are_dropped() {
    let html = r##"
        <html><body><main>
            <h1>P</h1>
            <a class="btn" href="#">Menu toggle</a>
            <a class="btn" href="javascript:void(0)">Open popup</a>
        </main></body></html>
    "##;
    let result = extract(html);
    assert!(ctas(&result.blocks).is_empty());
}

#[test]
fn relative_href_resolves_against_canonical() {
    let html = r#"
        <html><head>
            <link rel="canonical" href="https://acme.example/services/">
        </head><body><main>
            <h1>P</h1>
            <a class="elementor-button" href="/contact">Book now</a>
        </main></body></html>
    "#;
    let result = extract(html);
    assert_eq!(
        ctas(&result.blocks),
        vec![&Block::Cta {
            text: "Book now".into(),
            href: Some("https://acme.example/contact".into()),
            meta: None,
        }]
    );
}

#[test]
fn buttons_without_href_are_ctas() {
    let html = r#"
        <html><body><main>
            <h1>P</h1>
            <button>Call today</button>
        </main></body></html>
    "#;
    let result = extract(html);
    assert_eq!(
        ctas(&result.blocks),
        vec![&Block::Cta {
            text: "Call today".into(),
            href: None,
            meta: None,
        }]
    );
}

#[test]
fn navigation_links_are_not_ctas() {
    let html = r#"
        <html><body><main>
            <h1>P</h1>
            <ul class="menu-list">
                <li><a class="btn" href="/a">First entry</a></li>
                <li><a class="btn" href="/b">Second entry</a></li>
            </ul>
            <a href="/blog/post">Read more</a>
        </main></body></html>
    "#;
    let result = extract(html);
    assert!(ctas(&result.blocks).is_empty());
}

#[test]
fn api_endpoint_links_are_excluded() {
    let html = r#"
        <html><body><main>
            <h1>P</h1>
            <a class="btn" href="https://cdn.trustindex.io/api/widget.js">See our reviews</a>
        </main></body></html>
    "#;
    let result = extract(html);
    assert!(ctas(&result.blocks).is_empty());
}

#[test]
fn long_text_links_are_not_ctas() {
    let html = r#"
        <html><body><main>
            <h1>P</h1>
            <a class="btn" href="/p">This anchor text is far too long to read as a call to action button label</a>
        </main></body></html>
    "#;
    let result = extract(html);
    assert!(ctas(&result.blocks).is_empty());
}

#[test]
fn tel_href_survives_unresolved() {
    let html = r#"
        <html><head>
            <link rel="canonical" href="https://acme.example/">
        </head><body><main>
            <h1>P</h1>
            <a class="wp-element-button" href="tel:+15551234567">Call us now</a>
        </main></body></html>
    "#;
    let result = extract(html);
    assert_eq!(
        ctas(&result.blocks),
        vec![&Block::Cta {
            text: "Call us now".into(),
            href: Some("tel:+15551234567".into()),
            meta: None,
        }]
    );
}
