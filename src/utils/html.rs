use std::collections::HashSet;

/// Reduce server-provided HTML to plain text for terminal output.
///
/// Every tag is dropped using the ammonia library; the bodies of <script>
/// and <style> are removed entirely. Entities that the sanitizer emits for
/// text content are turned back into characters.
pub fn plain_text(input: &str) -> String {
    let cleaned = ammonia::Builder::empty()
        .clean_content_tags(HashSet::from(["script", "style"]))
        .clean(input)
        .to_string();

    cleaned
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .trim()
        .to_string()
}
