#![cfg(feature = "logging")]

mod common;

use common::{config, init_tracing, TestSource};
use notificare::{Application, EventKind, LogWriter, Notificare, Service};

#[tokio::test]
async fn attaches_one_listener_per_event_kind() {
    init_tracing();
    let ctx = Notificare::builder(config())
        .with_source(TestSource::ok(Application::with_services("app", &[Service::Push])))
        .build()
        .unwrap();

    let mut set = LogWriter::new().attach(&ctx);
    assert_eq!(set.len(), EventKind::ALL.len());
    for kind in EventKind::ALL {
        assert_eq!(ctx.listener_count(kind), 1, "{kind}");
    }

    ctx.launch().await.unwrap();
    ctx.unlaunch().await;

    set.dispose_all();
    assert!(set.is_empty());
    for kind in EventKind::ALL {
        assert_eq!(ctx.listener_count(kind), 0, "{kind}");
    }
}
