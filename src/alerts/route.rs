use std::collections::HashMap;

/// Where alerts for a scale are delivered and how its weight is labelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertRoute {
    pub channel: String,
    pub recipient: String,
    pub unit: String,
}

#[derive(Debug, Clone, Default)]
pub struct AlertRoutes {
    routes: HashMap<String, AlertRoute>,
}

impl AlertRoutes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, scale_id: impl Into<String>, route: AlertRoute) {
        self.routes.insert(scale_id.into(), route);
    }

    pub fn resolve(&self, scale_id: &str) -> Option<&AlertRoute> {
        self.routes.get(scale_id)
    }
}
