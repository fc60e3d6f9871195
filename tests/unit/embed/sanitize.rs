use super::*;

#[test]
fn scripts_and_handlers_are_removed() {
    let html = r#"<div class="x" onclick="steal()">hi<script>alert(1)</script></div>"#;
    assert_eq!(sanitize_embed_html(html), r#"<div class="x">hi</div>"#);
}

#[test]
fn iframes_keep_allowed_attributes() {
    let html = r#"<iframe width="560" height="315" src="https://www.youtube.com/embed/xyz" srcdoc="<b>x</b>" allowfullscreen></iframe>"#;
    assert_eq!(
        sanitize_embed_html(html),
        r#"<iframe width="560" height="315" src="https://www.youtube.com/embed/xyz" allowfullscreen></iframe>"#
    );
}

#[test]
fn iframe_sources_must_be_https() {
    let out = sanitize_embed_html(r#"<iframe src="http://insecure.example/e"></iframe>"#);
    assert_eq!(out, "<iframe></iframe>");
    let out = sanitize_embed_html(r#"<iframe src="javascript:alert(1)"></iframe>"#);
    assert_eq!(out, "<iframe></iframe>");
}

#[test]
fn protocol_relative_urls_are_upgraded() {
    let out = sanitize_embed_html(r#"<blockquote cite="//www.instagram.com/p/abc/"></blockquote>"#);
    assert_eq!(
        out,
        r#"<blockquote cite="https://www.instagram.com/p/abc/"></blockquote>"#
    );
}

#[test]
fn unknown_tags_keep_text() {
    let out = sanitize_embed_html("<marquee>hello <blink>world</blink></marquee>");
    assert_eq!(out, "hello world");
}

#[test]
fn links_allow_web_and_mailto() {
    let out = sanitize_embed_html(
        r#"<a href="http://x.example" target="_blank">a</a><a href="mailto:me@x.example">b</a><a href="data:text/html,x">c</a>"#,
    );
    assert_eq!(
        out,
        r#"<a href="http://x.example" target="_blank">a</a><a href="mailto:me@x.example">b</a><a>c</a>"#
    );
}

#[test]
fn style_with_urls_is_dropped() {
    let out = sanitize_embed_html(
        r#"<div style="background:url(javascript:x)">a</div><span style="width: 10px">b</span>"#,
    );
    assert_eq!(out, r#"<div>a</div><span style="width: 10px">b</span>"#);
}

#[test]
fn nested_script_tricks_are_removed() {
    let out = sanitize_embed_html("<scr<script>x</script>ipt>alert(1)</script>");
    assert!(!out.to_ascii_lowercase().contains("<script"));
}

#[test]
fn unterminated_tags_are_escaped() {
    let out = sanitize_embed_html(r#"<p>x</p><img src=x onerror=alert(1) title="open"#);
    assert_eq!(out, r#"<p>x</p>&lt;img src=x onerror=alert(1) title="open"#);
}

#[test]
fn comments_are_removed() {
    assert_eq!(sanitize_embed_html("<p>a<!-- hidden --></p>"), "<p>a</p>");
}

#[test]
fn sanitizing_is_idempotent() {
    for html in [
        r#"<iframe src="//player.vimeo.com/video/1" width=640 height='360' onload="x()"></iframe>"#,
        r#"<a title="a &quot;quoted&quot; > b" href="https://x.example">t</a>"#,
        r#"<blockquote class="tiktok-embed" data-video-id="1"><section>hi</section></blockquote>"#,
        "<img src=\"https://i.example/a.png\" alt=\"x\"/>",
        "plain < text > here",
    ] {
        let once = sanitize_embed_html(html);
        assert_eq!(sanitize_embed_html(&once), once, "input {html:?}");
    }
}
