//! 用 quick-xml 逐事件扫一遍 feed，保留条目字段的原始文本。
//!
//! feed-rs 会把日期解析成 `DateTime`，原始字符串就丢了；文档被截断时也会整体报错。
//! 这里只收集已经闭合的 `<item>` / `<entry>`。

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct RawEntry {
    pub title: String,
    pub link: String,
    /// pubDate > published > dc:date > updated，原样保留 (仅去首尾空白)
    pub published: String,
    pub summary: String,
}

#[derive(Debug, Default)]
pub struct RawScan {
    pub entries: Vec<RawEntry>,
    /// 读到 Eof 且没有 XML 错误
    pub complete: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Field {
    Title,
    Link,
    PubDate,
    Published,
    DcDate,
    Updated,
    Summary,
}

impl Field {
    fn from_local_name(name: &[u8]) -> Option<Self> {
        match name {
            b"title" => Some(Field::Title),
            b"link" => Some(Field::Link),
            b"pubDate" => Some(Field::PubDate),
            b"published" => Some(Field::Published),
            b"date" => Some(Field::DcDate),
            b"updated" => Some(Field::Updated),
            b"description" | b"summary" => Some(Field::Summary),
            _ => None,
        }
    }
}

#[derive(Default)]
struct EntryBuilder {
    title: String,
    link_text: String,
    links: Vec<(String, Option<String>)>,
    pub_date: String,
    published: String,
    dc_date: String,
    updated: String,
    summary: String,
}

impl EntryBuilder {
    fn buffer(&mut self, field: Field) -> &mut String {
        match field {
            Field::Title => &mut self.title,
            Field::Link => &mut self.link_text,
            Field::PubDate => &mut self.pub_date,
            Field::Published => &mut self.published,
            Field::DcDate => &mut self.dc_date,
            Field::Updated => &mut self.updated,
            Field::Summary => &mut self.summary,
        }
    }

    fn push_link_attrs(&mut self, e: &BytesStart<'_>) {
        let mut href = None;
        let mut rel = None;
        for attr in e.attributes().flatten() {
            let value = attr.unescape_value().map(|v| v.into_owned()).unwrap_or_default();
            match attr.key.local_name().as_ref() {
                b"href" => href = Some(value),
                b"rel" => rel = Some(value),
                _ => {}
            }
        }
        if let Some(href) = href {
            self.links.push((href, rel));
        }
    }

    fn finish(self) -> RawEntry {
        let link_text = self.link_text.trim().to_string();
        let link = if link_text.is_empty() {
            preferred_link(&self.links).unwrap_or_default()
        } else {
            link_text
        };

        let published = [&self.pub_date, &self.published, &self.dc_date, &self.updated]
            .into_iter()
            .map(|s| s.trim())
            .find(|s| !s.is_empty())
            .unwrap_or("")
            .to_string();

        RawEntry {
            title: self.title.trim().to_string(),
            link,
            published,
            summary: self.summary.trim().to_string(),
        }
    }
}

/// rel="alternate" 或没有 rel 的优先，其次第一个
pub fn preferred_link(links: &[(String, Option<String>)]) -> Option<String> {
    links
        .iter()
        .find(|(_, rel)| rel.as_deref().map_or(true, |r| r == "alternate"))
        .or_else(|| links.first())
        .map(|(href, _)| href.trim().to_string())
}

fn is_entry(name: &[u8]) -> bool {
    name == b"item" || name == b"entry"
}

pub fn scan_entries(bytes: &[u8]) -> RawScan {
    let text = String::from_utf8_lossy(bytes);
    let mut reader = Reader::from_str(&text);

    let mut scan = RawScan::default();
    let mut current: Option<EntryBuilder> = None;
    let mut field: Option<(Field, Vec<u8>)> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let local = e.local_name().as_ref().to_vec();
                if is_entry(&local) {
                    current = Some(EntryBuilder::default());
                    field = None;
                } else if let Some(entry) = current.as_mut() {
                    if local == b"link" {
                        entry.push_link_attrs(&e);
                    }
                    // 字段内部的嵌套标签 (xhtml summary 等) 不切换字段
                    if field.is_none() {
                        field = Field::from_local_name(&local).map(|f| (f, local));
                    }
                }
            }
            Ok(Event::Empty(e)) => {
                if let Some(entry) = current.as_mut() {
                    if e.local_name().as_ref() == b"link" {
                        entry.push_link_attrs(&e);
                    }
                }
            }
            Ok(Event::Text(e)) => {
                if let (Some(entry), Some((f, _))) = (current.as_mut(), field.as_ref()) {
                    let text = e.unescape()
                        .map(|t| t.into_owned())
                        .unwrap_or_else(|_| String::from_utf8_lossy(e.as_ref()).into_owned());
                    entry.buffer(*f).push_str(&text);
                }
            }
            Ok(Event::CData(e)) => {
                if let (Some(entry), Some((f, _))) = (current.as_mut(), field.as_ref()) {
                    entry.buffer(*f).push_str(&String::from_utf8_lossy(e.as_ref()));
                }
            }
            Ok(Event::End(e)) => {
                let local = e.local_name();
                if is_entry(local.as_ref()) {
                    if let Some(entry) = current.take() {
                        scan.entries.push(entry.finish());
                    }
                    field = None;
                } else if field.as_ref().is_some_and(|(_, name)| name.as_slice() == local.as_ref()) {
                    field = None;
                }
            }
            Ok(Event::Eof) => {
                scan.complete = current.is_none();
                break;
            }
            Err(_) => break,
            _ => {}
        }
    }

    scan
}
