//! RSS 2.0 feed over the full sorted article corpus.
//!
//! Text fields are XML-escaped; the article body travels as literal content
//! inside a CDATA section so embedded markup survives unmangled.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use tracing::instrument;

use crate::config::SiteConfig;
use crate::errors::AppError;
use crate::models::Article;
use crate::services::AppState;
use crate::xml::{cdata, escape_text};

#[instrument(skip(state))]
pub async fn rss_feed(State(state): State<AppState>) -> Result<Response, AppError> {
    let articles = state.repository.all_articles().await?;
    let xml = build_feed(&state.site, &articles, Utc::now());

    Ok((
        [
            (header::CONTENT_TYPE, "application/xml; charset=utf-8"),
            (header::CACHE_CONTROL, "public, max-age=3600"),
        ],
        xml,
    )
        .into_response())
}

fn rss_date(at: DateTime<Utc>) -> String {
    at.to_rfc2822()
}

fn build_feed(site: &SiteConfig, articles: &[Article], now: DateTime<Utc>) -> String {
    let base = site.base_url.trim_end_matches('/');
    let mut xml = String::with_capacity(1024 + articles.len() * 512);

    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.push('\n');
    xml.push_str(
        r#"<rss version="2.0" xmlns:atom="http://www.w3.org/2005/Atom" xmlns:content="http://purl.org/rss/1.0/modules/content/">"#,
    );
    xml.push_str("\n  <channel>\n");
    xml.push_str(&format!("    <title>{}</title>\n", escape_text(&site.title)));
    xml.push_str(&format!(
        "    <description>{}</description>\n",
        escape_text(&site.description)
    ));
    xml.push_str(&format!("    <link>{base}</link>\n"));
    xml.push_str(&format!(
        r#"    <atom:link href="{base}/rss.xml" rel="self" type="application/rss+xml"/>"#
    ));
    xml.push('\n');
    xml.push_str("    <language>en-us</language>\n");
    xml.push_str(&format!(
        "    <lastBuildDate>{}</lastBuildDate>\n",
        rss_date(now)
    ));
    xml.push_str("    <generator>newshub</generator>\n");

    for article in articles {
        let link = format!("{base}/news/{}", article.slug);
        xml.push_str("    <item>\n");
        xml.push_str(&format!(
            "      <title>{}</title>\n",
            escape_text(&article.title)
        ));
        xml.push_str(&format!(
            "      <description>{}</description>\n",
            escape_text(&article.excerpt)
        ));
        xml.push_str(&format!("      <link>{link}</link>\n"));
        xml.push_str(&format!(
            r#"      <guid isPermaLink="true">{link}</guid>"#
        ));
        xml.push('\n');
        xml.push_str(&format!(
            "      <pubDate>{}</pubDate>\n",
            rss_date(article.published_at)
        ));
        xml.push_str(&format!(
            "      <author>news@newshub.com ({})</author>\n",
            escape_text(&article.author)
        ));
        xml.push_str(&format!(
            "      <category>{}</category>\n",
            escape_text(&article.category)
        ));
        for tag in &article.tags {
            xml.push_str(&format!("      <category>{}</category>\n", escape_text(tag)));
        }
        xml.push_str(&format!(
            "      <content:encoded>{}</content:encoded>\n",
            cdata(&article.content)
        ));
        xml.push_str("    </item>\n");
    }

    xml.push_str("  </channel>\n</rss>\n");
    xml
}
