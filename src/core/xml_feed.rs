use crate::core::fetch::fetch_bytes;
use crate::domain::model::{CanonicalRow, OutputTable};
use crate::domain::xml::XmlElement;
use crate::utils::error::{CatalogError, Result, SchemaViolation};
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::NsReader;
use reqwest::Client;

/// Google 商品 feed 使用的命名空間
pub const GOOGLE_PRODUCT_NS: &str = "http://base.google.com/ns/1.0";

/// 哪個 feed 欄位填入哪個輸出欄位，`None` 表示永遠留空
pub fn feed_field_for(column: &'static str) -> Option<&'static str> {
    match column {
        "fb_product_category" | "video[0].url" | "video[0].tag[0]" | "product_tags[1]"
        | "style[0]" => None,
        "product_tags[0]" => Some("product_type"),
        other => Some(other),
    }
}

/// 先找命名空間版本，再找無命名空間版本；空白文字視為不存在
pub fn field_text(item: &XmlElement, field: &str) -> Option<String> {
    non_empty_text(item.find(Some(GOOGLE_PRODUCT_NS), field))
        .or_else(|| non_empty_text(item.find(None, field)))
}

fn non_empty_text(element: Option<&XmlElement>) -> Option<String> {
    element
        .map(|el| el.text.trim())
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

pub fn item_to_row(item: &XmlElement) -> CanonicalRow {
    CanonicalRow::from_fn(|column| {
        feed_field_for(column)
            .and_then(|field| field_text(item, field))
            .unwrap_or_default()
    })
}

pub fn items_to_table(items: &[XmlElement]) -> OutputTable {
    OutputTable::new(items.iter().map(item_to_row).collect())
}

/// 解析整份 XML 文件，回傳根元素
pub fn parse_document(bytes: &[u8]) -> Result<XmlElement> {
    let mut reader = NsReader::from_reader(bytes);
    let mut buf = Vec::new();
    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        match reader
            .read_resolved_event_into(&mut buf)
            .map_err(|e| xml_error(e.to_string()))?
        {
            (resolved, Event::Start(start)) => {
                stack.push(open_element(resolved, &start)?);
            }
            (resolved, Event::Empty(start)) => {
                let element = open_element(resolved, &start)?;
                close_element(&mut stack, &mut root, element)?;
            }
            (_, Event::End(_)) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| xml_error("unexpected closing tag".to_string()))?;
                close_element(&mut stack, &mut root, element)?;
            }
            (_, Event::Text(text)) => {
                if let Some(current) = stack.last_mut() {
                    if current.children.is_empty() {
                        let unescaped = text.unescape().map_err(|e| xml_error(e.to_string()))?;
                        current.text.push_str(&unescaped);
                    }
                }
            }
            (_, Event::CData(data)) => {
                if let Some(current) = stack.last_mut() {
                    if current.children.is_empty() {
                        let raw = data.into_inner();
                        let content = std::str::from_utf8(&raw)
                            .map_err(|e| xml_error(format!("invalid UTF-8 in CDATA: {}", e)))?;
                        current.text.push_str(content);
                    }
                }
            }
            (_, Event::Eof) => break,
            _ => {}
        }
        buf.clear();
    }

    if let Some(open) = stack.last() {
        return Err(xml_error(format!(
            "unexpected end of document, <{}> is not closed",
            open.qualified_name()
        )));
    }
    root.ok_or_else(|| xml_error("no root element found".to_string()))
}

fn open_element(resolved: ResolveResult<'_>, start: &BytesStart<'_>) -> Result<XmlElement> {
    let name = std::str::from_utf8(start.local_name().as_ref())
        .map_err(|e| xml_error(format!("invalid UTF-8 in element name: {}", e)))?
        .to_string();

    let namespace = match resolved {
        ResolveResult::Bound(ns) => Some(
            std::str::from_utf8(ns.as_ref())
                .map_err(|e| xml_error(format!("invalid UTF-8 in namespace: {}", e)))?
                .to_string(),
        ),
        ResolveResult::Unbound => None,
        ResolveResult::Unknown(prefix) => {
            return Err(xml_error(format!(
                "unbound namespace prefix '{}' on <{}>",
                String::from_utf8_lossy(&prefix),
                name
            )))
        }
    };

    Ok(XmlElement::new(namespace, name))
}

fn close_element(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<()> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(element);
            Ok(())
        }
        None if root.is_none() => {
            *root = Some(element);
            Ok(())
        }
        None => Err(xml_error(format!(
            "junk after document element: <{}>",
            element.qualified_name()
        ))),
    }
}

fn xml_error(message: String) -> CatalogError {
    CatalogError::XmlParseError { message }
}

/// 找出 `channel` 底下所有 `item`，結構不符時附上實際的標籤名稱
pub fn locate_items(root: &XmlElement) -> Result<Vec<XmlElement>> {
    let channel = root.find(None, "channel").ok_or_else(|| {
        CatalogError::SchemaError(SchemaViolation::MissingChannel {
            root_children: root.child_names(),
        })
    })?;

    let items: Vec<XmlElement> = channel.find_all(None, "item").cloned().collect();
    if items.is_empty() {
        return Err(CatalogError::SchemaError(SchemaViolation::NoItems {
            channel_children: channel.child_names(),
        }));
    }

    Ok(items)
}

pub async fn load_feed_items(client: &Client, feed_url: &str) -> Result<Vec<XmlElement>> {
    tracing::info!("⬇️ Downloading XML feed from {}", feed_url);
    let body = fetch_bytes(client, feed_url)
        .await
        .map_err(|source| CatalogError::FetchError {
            url: feed_url.to_string(),
            source,
        })?;
    tracing::info!("XML content length: {} bytes", body.len());

    let root = parse_document(&body)?;
    tracing::info!("✅ Parsed XML structure, root tag: {}", root.qualified_name());

    let items = locate_items(&root).inspect_err(|e| tracing::error!("❌ {}", e))?;
    tracing::info!("🛒 Found {} items in the feed", items.len());
    Ok(items)
}
