use super::*;
use std::sync::Arc;

#[test]
fn write_lock_should_recover_from_poisoned_lock() {
    let lock = Arc::new(RwLock::new(1));
    let poisoner = Arc::clone(&lock);
    let _ = std::thread::spawn(move || {
        let _guard = poisoner.write().expect("first write");
        panic!("poison the lock");
    })
    .join();

    assert!(lock.is_poisoned());
    *write_lock(&lock, "test") += 1;
    assert_eq!(*read_lock(&lock, "test"), 2);
}

#[test]
fn lock_mutex_should_recover_from_poisoned_mutex() {
    let lock = Arc::new(Mutex::new(Vec::<u8>::new()));
    let poisoner = Arc::clone(&lock);
    let _ = std::thread::spawn(move || {
        let _guard = poisoner.lock().expect("first lock");
        panic!("poison the mutex");
    })
    .join();

    lock_mutex(&lock, "test").push(7);
    assert_eq!(lock_mutex(&lock, "test").as_slice(), &[7]);
}
