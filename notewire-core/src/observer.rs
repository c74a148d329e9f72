use crate::descriptor::Notification;
use std::fmt::Debug;
use std::sync::Arc;

/// Shareable observer callback.
pub type ObserverFn<N> = Arc<dyn Fn(&N) + Send + Sync>;

/// No-op observer
pub fn no_op_observer<N: 'static>() -> ObserverFn<N> {
    Arc::new(|_notification: &N| {})
}

/// Tracing observer - logs every delivery to the tracing crate
pub fn tracing_observer<N>() -> ObserverFn<N>
where
    N: Notification + Debug,
{
    Arc::new(move |notification: &N| {
        tracing::info!(target: "notewire::observer", "{}({:?})", N::name(), notification);
    })
}

/// Filter observer - forwards only deliveries accepted by `predicate`
pub fn filter_observer<N, F>(wrapped: ObserverFn<N>, predicate: F) -> ObserverFn<N>
where
    N: 'static,
    F: Fn(&N) -> bool + Send + Sync + 'static,
{
    Arc::new(move |notification: &N| {
        if predicate(notification) {
            wrapped(notification);
        }
    })
}

/// Tee observer - call multiple observers in order
pub fn tee_observer<N: 'static>(observers: Vec<ObserverFn<N>>) -> ObserverFn<N> {
    Arc::new(move |notification: &N| {
        for observer in &observers {
            observer(notification);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Debug)]
    struct Level(u8);

    impl Notification for Level {
        type Object = ();

        fn object(&self) -> &() {
            &()
        }
    }

    fn collect(into: &Arc<Mutex<Vec<u8>>>) -> ObserverFn<Level> {
        let into = Arc::clone(into);
        Arc::new(move |level: &Level| into.lock().unwrap().push(level.0))
    }

    #[test]
    fn filter_drops_rejected_deliveries() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let observer = filter_observer(collect(&seen), |level: &Level| level.0 > 2);
        for n in 0..5 {
            observer(&Level(n));
        }
        assert_eq!(*seen.lock().unwrap(), vec![3, 4]);
    }

    #[test]
    fn tee_fans_out_in_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let observer = tee_observer(vec![
            collect(&seen),
            no_op_observer(),
            tracing_observer(),
            collect(&seen),
        ]);
        observer(&Level(9));
        assert_eq!(*seen.lock().unwrap(), vec![9, 9]);
    }
}
