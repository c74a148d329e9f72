use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use notewire::{
    Notification, NotificationCenter, ObservationBag, ObservationHandle, Sender, TypedCenter,
};

struct Widget;

#[derive(Notification)]
struct Ping {
    object: Arc<Widget>,
    count: i64,
}

#[test]
fn ping_reaches_only_the_observed_widget() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let center = NotificationCenter::default();
    let widget_a = Arc::new(Widget);
    let widget_b = Arc::new(Widget);

    let fired = Arc::new(AtomicUsize::new(0));
    let last_count = Arc::new(AtomicUsize::new(0));
    let _handle = {
        let fired = Arc::clone(&fired);
        let last_count = Arc::clone(&last_count);
        center.add_observer(widget_a.object_id(), None, move |ping: &Ping| {
            fired.fetch_add(1, Ordering::SeqCst);
            last_count.store(ping.count as usize, Ordering::SeqCst);
        })
    };

    center.post(Ping {
        object: Arc::clone(&widget_a),
        count: 3,
    });
    assert_eq!(fired.load(Ordering::SeqCst), 1);
    assert_eq!(last_count.load(Ordering::SeqCst), 3);

    center.post(Ping {
        object: widget_b,
        count: 7,
    });
    assert_eq!(fired.load(Ordering::SeqCst), 1);
    assert_eq!(last_count.load(Ordering::SeqCst), 3);
}

#[test]
fn emptying_a_bag_flips_every_flag() {
    let flags: Vec<Arc<AtomicBool>> = (0..3).map(|_| Arc::new(AtomicBool::new(false))).collect();
    let bag = ObservationBag::new();
    for flag in &flags {
        let flag = Arc::clone(flag);
        ObservationHandle::new(move || flag.store(true, Ordering::SeqCst)).store_in(&bag);
    }

    bag.clear();
    assert!(flags.iter().all(|flag| flag.load(Ordering::SeqCst)));
    assert_eq!(bag.len(), 0);
}

#[test]
fn default_names_are_stable() {
    assert_eq!(Ping::name(), Ping::name());
    assert_eq!(Ping::name(), notewire::default_name::<Ping>());
}

#[test]
fn scoped_observation_ends_with_its_scope() {
    let center = NotificationCenter::default();
    let hits = Arc::new(AtomicUsize::new(0));
    {
        let hits = Arc::clone(&hits);
        let _handle = center.observe(move |_ping: &Ping| {
            hits.fetch_add(1, Ordering::SeqCst);
        });
        center.post(Ping {
            object: Arc::new(Widget),
            count: 1,
        });
    }
    center.post(Ping {
        object: Arc::new(Widget),
        count: 2,
    });
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}
