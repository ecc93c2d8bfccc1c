/// Blog cache key prefix
const BLOG_PREFIX: &str = "blog:";

/// Matches every cached blog listing, article, category and tag page
pub const BLOG_PATTERN: &str = "blog:*";

/// Paginated article listing
pub fn blog_list_key(page: u32, limit: u32) -> String {
    format!("{}list:{}:{}", BLOG_PREFIX, page, limit)
}

/// Every cached page of the article listing, whatever the page size
pub fn blog_list_pattern() -> String {
    format!("{}list:*", BLOG_PREFIX)
}

pub fn blog_article_key(slug: &str) -> String {
    format!("{}article:{}", BLOG_PREFIX, slug)
}

pub fn blog_category_key(category: &str) -> String {
    format!("{}category:{}", BLOG_PREFIX, category)
}

pub fn blog_tag_key(tag: &str) -> String {
    format!("{}tag:{}", BLOG_PREFIX, tag)
}
