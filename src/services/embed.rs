//! 社交预览跳转页
//!
//! 生成带 Open Graph / Twitter Card 标签的 HTML 文档，链接预览爬虫读取标签，
//! 浏览器则通过 meta refresh 或脚本跳转到目标地址。

use serde_json::Value;

use crate::storage::Metadata;

/// 渲染跳转页需要的数据，除 `url` 外均为可选
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmbedData {
    pub url: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
    pub video: Option<String>,
    pub audio: Option<String>,
    pub video_width: Option<u32>,
    pub video_height: Option<u32>,
    pub video_type: Option<String>,
}

impl EmbedData {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// 从存储的元数据构建渲染数据
    ///
    /// 读取 `title`、`description`、`thumbnail`、`video`、`audio`、
    /// `videoWidth`、`videoHeight`、`videoType`；尺寸可以是数字或数字字符串。
    pub fn from_metadata(url: impl Into<String>, metadata: &Metadata) -> Self {
        Self {
            url: url.into(),
            title: text_field(metadata, "title"),
            description: text_field(metadata, "description"),
            thumbnail: text_field(metadata, "thumbnail"),
            video: text_field(metadata, "video"),
            audio: text_field(metadata, "audio"),
            video_width: dimension_field(metadata, "videoWidth"),
            video_height: dimension_field(metadata, "videoHeight"),
            video_type: text_field(metadata, "videoType"),
        }
    }
}

fn text_field(metadata: &Metadata, key: &str) -> Option<String> {
    match metadata.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn dimension_field(metadata: &Metadata, key: &str) -> Option<u32> {
    match metadata.get(key)? {
        Value::Number(n) => n.as_u64().and_then(|v| u32::try_from(v).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// 转义 HTML 属性值中的特殊字符
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// 把 URL 编码成可以直接放进 `<script>` 的 JSON 字符串字面量
///
/// `<` 额外转成 `\u003c`，防止 `</script>` 提前结束脚本。
fn script_string_literal(value: &str) -> String {
    Value::String(value.to_string())
        .to_string()
        .replace('<', "\\u003c")
}

/// 空字符串与缺失同样处理
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn dimension(value: Option<u32>) -> Option<u32> {
    value.filter(|v| *v > 0)
}

#[derive(Default)]
struct MetaTags(Vec<String>);

impl MetaTags {
    fn property(&mut self, property: &str, content: &str) {
        self.0.push(format!(
            r#"<meta property="{}" content="{}">"#,
            property,
            escape_html(content)
        ));
    }

    fn name(&mut self, name: &str, content: &str) {
        self.0.push(format!(
            r#"<meta name="{}" content="{}">"#,
            name,
            escape_html(content)
        ));
    }

    fn render(&self) -> String {
        self.0.join("\n    ")
    }
}

/// 生成跳转页 HTML
pub fn generate_embed_html(data: &EmbedData) -> String {
    let title = present(&data.title);
    let description = present(&data.description);
    let thumbnail = present(&data.thumbnail);
    let video = present(&data.video);
    let audio = present(&data.audio);
    let video_type = present(&data.video_type);
    let video_width = dimension(data.video_width);
    let video_height = dimension(data.video_height);

    let og_type = match (video, audio) {
        (Some(_), _) => "video.other",
        (None, Some(_)) => "music.song",
        (None, None) => "website",
    };
    let twitter_card = match (video, thumbnail) {
        (Some(_), _) => "player",
        (None, Some(_)) => "summary_large_image",
        (None, None) => "summary",
    };

    let mut tags = MetaTags::default();
    tags.property("og:url", &data.url);
    tags.property("og:type", og_type);

    if let Some(title) = title {
        tags.property("og:title", title);
        tags.name("twitter:title", title);
    }

    if let Some(description) = description {
        tags.property("og:description", description);
        tags.name("twitter:description", description);
    }

    if let Some(thumbnail) = thumbnail {
        tags.property("og:image", thumbnail);
        tags.name("twitter:image", thumbnail);
    }

    if let Some(video) = video {
        tags.property("og:video", video);
        tags.property("og:video:url", video);
        tags.property("og:video:secure_url", video);
        if let Some(video_type) = video_type {
            tags.property("og:video:type", video_type);
        }
        if let Some(width) = video_width {
            tags.property("og:video:width", &width.to_string());
        }
        if let Some(height) = video_height {
            tags.property("og:video:height", &height.to_string());
        }

        // Twitter 播放器卡片需要预览图
        if thumbnail.is_some() {
            tags.name("twitter:player", video);
            if let Some(width) = video_width {
                tags.name("twitter:player:width", &width.to_string());
            }
            if let Some(height) = video_height {
                tags.name("twitter:player:height", &height.to_string());
            }
        }
    }

    if let Some(audio) = audio {
        tags.property("og:audio", audio);
        tags.property("og:audio:url", audio);
        tags.property("og:audio:secure_url", audio);
    }

    tags.name("twitter:card", twitter_card);

    let escaped_url = escape_html(&data.url);
    let page_title = escape_html(title.unwrap_or(&data.url));

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>{page_title}</title>
    {tags}
    <meta http-equiv="refresh" content="0; url={escaped_url}">
    <script>window.location.replace({script_url});</script>
</head>
<body>
    <p>Redirecting to <a href="{escaped_url}">{escaped_url}</a></p>
</body>
</html>
"#,
        page_title = page_title,
        tags = tags.render(),
        escaped_url = escaped_url,
        script_url = script_string_literal(&data.url),
    )
}
