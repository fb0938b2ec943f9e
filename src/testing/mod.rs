mod mock_instance_store;

#[allow(unused_imports)]
pub use mock_instance_store::MockInstanceStore;

use crate::adapters::MemoryStackSource;
use crate::app::AppContext;
use crate::domain::Settings;

/// Root `site` stack with a nested `wp` stack and a load balancer charm.
///
/// `site.wp` forwards `website` from its `app` charm; `site` relates `lb` to it.
pub fn site_source() -> MemoryStackSource {
    MemoryStackSource::new()
        .with_document(
            "site",
            r#"
name: site
components:
  wp:
    stack: ./wp
  lb:
    charm: ch:haproxy
relations:
  - provider: wp:website
    requirer: lb:reverseproxy
"#,
        )
        .with_document(
            "wp",
            r#"
name: wp
components:
  app:
    charm: ch:wordpress
    units: 2
  db:
    charm: ch:mysql
    trust: true
provides:
  website:
    forward: app:website
relations:
  - provider: db:db
    requirer: app:database
"#,
        )
}

pub fn test_context(
    source: MemoryStackSource,
    settings: Settings,
) -> AppContext<MemoryStackSource, MockInstanceStore> {
    AppContext::new(source, MockInstanceStore::new(), settings)
}
