use std::rc::Rc;

use url::Url;

/// A named blob served by the simulated transfer engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    pub name: String,
    pub data: Vec<u8>,
}

/// Ordered set of payloads a [`TransferHandle`](super::TransferHandle)
/// can be pointed at. Index order is the order payloads were added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PayloadFixture {
    payloads: Vec<Payload>,
}

impl PayloadFixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_payload(
        mut self,
        name: impl Into<String>,
        data: impl Into<Vec<u8>>,
    ) -> Self {
        self.push(name, data);
        self
    }

    /// Append a payload and return its index
    pub fn push(
        &mut self,
        name: impl Into<String>,
        data: impl Into<Vec<u8>>,
    ) -> usize {
        self.payloads.push(Payload {
            name: name.into(),
            data: data.into(),
        });
        self.payloads.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&Payload> {
        self.payloads.get(index)
    }

    pub fn len(&self) -> usize {
        self.payloads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payloads.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.payloads
            .iter()
            .map(|p| p.name.as_str())
    }

    /// Resolve a URL-like identifier to a payload index.
    ///
    /// The final path segment is matched exactly against payload names
    /// first. Failing that, the first payload (in fixture order) whose name
    /// occurs anywhere in the identifier wins.
    pub fn lookup(&self, identifier: &str) -> Option<usize> {
        if let Some(segment) = last_segment(identifier) {
            if let Some(index) = self
                .payloads
                .iter()
                .position(|p| p.name == segment)
            {
                return Some(index);
            }
        }

        self.payloads
            .iter()
            .position(|p| identifier.contains(p.name.as_str()))
    }

    pub fn into_shared(self) -> Rc<Self> {
        Rc::new(self)
    }
}

fn last_segment(identifier: &str) -> Option<String> {
    match Url::parse(identifier) {
        Ok(url) => url
            .path_segments()
            .and_then(|segments| segments.last())
            .filter(|s| !s.is_empty())
            .map(str::to_owned),
        Err(_) => identifier
            .rsplit('/')
            .next()
            .filter(|s| !s.is_empty())
            .map(str::to_owned),
    }
}
