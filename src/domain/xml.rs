/// 解析後的 XML 元素，只保留轉換需要的部分
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    pub namespace: Option<String>,
    pub name: String,
    /// Text preceding the first child element.
    pub text: String,
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    pub fn new(namespace: Option<String>, name: impl Into<String>) -> Self {
        Self {
            namespace,
            name: name.into(),
            text: String::new(),
            children: Vec::new(),
        }
    }

    /// `{uri}local` for namespaced elements, `local` otherwise.
    pub fn qualified_name(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{{{}}}{}", ns, self.name),
            None => self.name.clone(),
        }
    }

    pub fn matches(&self, namespace: Option<&str>, name: &str) -> bool {
        self.name == name && self.namespace.as_deref() == namespace
    }

    /// 第一個符合的子元素
    pub fn find(&self, namespace: Option<&str>, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|child| child.matches(namespace, name))
    }

    pub fn find_all<'a>(
        &'a self,
        namespace: Option<&'a str>,
        name: &'a str,
    ) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.children
            .iter()
            .filter(move |child| child.matches(namespace, name))
    }

    pub fn child_names(&self) -> Vec<String> {
        self.children.iter().map(XmlElement::qualified_name).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NS: &str = "http://base.google.com/ns/1.0";

    fn element(namespace: Option<&str>, name: &str, text: &str) -> XmlElement {
        let mut el = XmlElement::new(namespace.map(str::to_string), name);
        el.text = text.to_string();
        el
    }

    #[test]
    fn test_find_respects_namespace() {
        let mut item = XmlElement::new(None, "item");
        item.children.push(element(None, "title", "plain"));
        item.children.push(element(Some(NS), "title", "namespaced"));

        assert_eq!(item.find(Some(NS), "title").unwrap().text, "namespaced");
        assert_eq!(item.find(None, "title").unwrap().text, "plain");
        assert!(item.find(Some(NS), "price").is_none());
    }

    #[test]
    fn test_child_names_are_qualified() {
        let mut item = XmlElement::new(None, "item");
        item.children.push(element(None, "title", ""));
        item.children.push(element(Some(NS), "id", ""));

        assert_eq!(
            item.child_names(),
            vec!["title".to_string(), format!("{{{}}}id", NS)]
        );
    }
}
