use crate::record::{Record, ResourceId};

/// One page of a resource list, already normalized. `page_number` is 1-based.
#[derive(Clone, Debug, PartialEq)]
pub struct Page {
    pub items: Vec<Record>,
    pub page_number: u32,
    pub total_pages: u32,
    pub total_items: Option<u64>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListQuery {
    pub page: u32,
    pub page_size: u32,
    pub sort: Option<String>,
    pub category_id: Option<ResourceId>,
}

impl ListQuery {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self { page: page.max(1), page_size: page_size.max(1), sort: None, category_id: None }
    }

    pub fn with_sort(mut self, sort: Option<String>) -> Self {
        self.sort = sort.filter(|s| !s.trim().is_empty());
        self
    }

    pub fn with_category(mut self, category_id: Option<ResourceId>) -> Self {
        self.category_id = category_id;
        self
    }

    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("page", self.page.to_string()), ("size", self.page_size.to_string())];
        if let Some(sort) = &self.sort {
            pairs.push(("sort", sort.clone()));
        }
        if let Some(id) = self.category_id {
            pairs.push(("categoryId", id.to_string()));
        }
        pairs
    }
}
