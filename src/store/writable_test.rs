use super::*;

fn recorder<T: Clone + Send + Sync + 'static>() -> (Arc<Mutex<Vec<T>>>, impl Fn(&T) + Send + Sync + 'static) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    (seen, move |v: &T| sink.lock().unwrap().push(v.clone()))
}

// =============================================================
// get / set / update
// =============================================================

#[test]
fn new_holds_initial_value() {
    let store = Writable::new(5);
    assert_eq!(store.get(), 5);
}

#[test]
fn set_replaces_value() {
    let store = Writable::new(String::from("a"));
    store.set("b".into());
    assert_eq!(store.get(), "b");
}

#[test]
fn update_mutates_in_place() {
    let store = Writable::new(vec![1, 2]);
    store.update(|v| v.push(3));
    assert_eq!(store.get(), vec![1, 2, 3]);
}

#[test]
fn with_reads_without_clone() {
    let store = Writable::new(vec![1, 2, 3]);
    assert_eq!(store.with(Vec::len), 3);
}

#[test]
fn clones_share_state() {
    let a = Writable::new(1);
    let b = a.clone();
    b.set(2);
    assert_eq!(a.get(), 2);
}

// =============================================================
// Subscribers
// =============================================================

#[test]
fn subscribe_fires_immediately_with_current_value() {
    let store = Writable::new(7);
    let (seen, cb) = recorder();
    store.subscribe(cb).forget();
    assert_eq!(*seen.lock().unwrap(), vec![7]);
}

#[test]
fn set_and_update_notify_synchronously() {
    let store = Writable::new(0);
    let (seen, cb) = recorder();
    store.subscribe(cb).forget();

    store.set(1);
    store.update(|v| *v += 10);

    assert_eq!(*seen.lock().unwrap(), vec![0, 1, 11]);
}

#[test]
fn setting_equal_value_still_notifies() {
    let store = Writable::new(3);
    let (seen, cb) = recorder();
    store.subscribe(cb).forget();
    store.set(3);
    assert_eq!(seen.lock().unwrap().len(), 2);
}

#[test]
fn subscribers_run_in_registration_order() {
    let store = Writable::new(0);
    let order = Arc::new(Mutex::new(Vec::new()));
    for tag in ["first", "second", "third"] {
        let order = Arc::clone(&order);
        store.subscribe(move |_| order.lock().unwrap().push(tag)).forget();
    }
    order.lock().unwrap().clear();

    store.set(1);

    assert_eq!(*order.lock().unwrap(), vec!["first", "second", "third"]);
}

#[test]
fn dropped_subscription_stops_receiving() {
    let store = Writable::new(0);
    let (seen, cb) = recorder();
    let sub = store.subscribe(cb);
    assert_eq!(store.subscriber_count(), 1);

    drop(sub);
    store.set(1);

    assert_eq!(store.subscriber_count(), 0);
    assert_eq!(*seen.lock().unwrap(), vec![0]);
}

#[test]
fn unsubscribe_removes_only_that_subscriber() {
    let store = Writable::new(0);
    let (kept, kept_cb) = recorder();
    let (removed, removed_cb) = recorder();
    store.subscribe(kept_cb).forget();
    let sub = store.subscribe(removed_cb);

    sub.unsubscribe();
    store.set(1);

    assert_eq!(*kept.lock().unwrap(), vec![0, 1]);
    assert_eq!(*removed.lock().unwrap(), vec![0]);
}

#[test]
fn forgotten_subscription_keeps_receiving() {
    let store = Writable::new(0);
    let (seen, cb) = recorder();
    store.subscribe(cb).forget();
    store.set(1);
    store.set(2);
    assert_eq!(*seen.lock().unwrap(), vec![0, 1, 2]);
    assert_eq!(store.subscriber_count(), 1);
}

#[test]
fn subscriber_can_read_its_own_store() {
    let store = Writable::new(1);
    let reader = store.clone();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    store.subscribe(move |_| sink.lock().unwrap().push(reader.get())).forget();

    store.set(2);

    assert_eq!(*seen.lock().unwrap(), vec![1, 2]);
}

#[test]
fn write_from_subscriber_leaves_later_subscribers_on_final_value() {
    let store = Writable::new(0);
    let clamp = store.clone();
    store
        .subscribe(move |v| {
            if *v > 10 {
                clamp.set(10);
            }
        })
        .forget();
    let (seen, cb) = recorder();
    store.subscribe(cb).forget();

    store.set(50);

    assert_eq!(store.get(), 10);
    assert_eq!(*seen.lock().unwrap(), vec![0, 50, 10]);
}

#[test]
fn nested_write_is_delivered_after_current_pass() {
    let store = Writable::new(0);
    let order = Arc::new(Mutex::new(Vec::new()));

    let bump = store.clone();
    let log = Arc::clone(&order);
    store
        .subscribe(move |v| {
            log.lock().unwrap().push(("first", *v));
            if *v == 1 {
                bump.update(|n| *n += 1);
            }
        })
        .forget();
    let log = Arc::clone(&order);
    store.subscribe(move |v| log.lock().unwrap().push(("second", *v))).forget();
    order.lock().unwrap().clear();

    store.set(1);

    assert_eq!(
        *order.lock().unwrap(),
        vec![("first", 1), ("second", 1), ("first", 2), ("second", 2)]
    );
}

#[test]
fn dropping_subscription_after_store_is_gone_is_harmless() {
    let store = Writable::new(0);
    let sub = store.subscribe(|_| {});
    drop(store);
    drop(sub);
}

#[test]
fn debug_shows_value_and_subscriber_count() {
    let store = Writable::new(42);
    store.subscribe(|_| {}).forget();
    let rendered = format!("{store:?}");
    assert!(rendered.contains("42"));
    assert!(rendered.contains("subscribers: 1"));
}
