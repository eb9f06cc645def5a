// A wait interrupted by a signal reports "nothing ready" instead of failing

use pollset::{Poller, Timeout};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

mod common;
use common::{fd_endpoint, pipe};

extern "C" fn on_signal(_: libc::c_int) {}

fn install_handler(signal: libc::c_int) {
    unsafe {
        let mut action: libc::sigaction = std::mem::zeroed();
        action.sa_sigaction = on_signal as extern "C" fn(libc::c_int) as libc::sighandler_t;
        libc::sigemptyset(&mut action.sa_mask);
        // No SA_RESTART: the blocked poll must see EINTR.
        action.sa_flags = 0;
        assert_eq!(libc::sigaction(signal, &action, std::ptr::null_mut()), 0);
    }
}

#[test]
fn test_signal_interrupted_wait_returns_false() {
    install_handler(libc::SIGUSR1);

    let done = Arc::new(AtomicBool::new(false));
    let (tx, rx) = mpsc::channel();

    let waiting_done = Arc::clone(&done);
    let waiter = thread::spawn(move || {
        tx.send(unsafe { libc::pthread_self() } as usize).unwrap();

        let (r, _w) = pipe();
        let mut poller: Poller = Poller::new();
        poller.add(fd_endpoint(&r)).unwrap();

        let result = poller.wait(Timeout::Forever);
        waiting_done.store(true, Ordering::SeqCst);
        result
    });

    let tid = rx.recv().unwrap();
    // Keep signalling until the wait returns in case the first one lands early.
    while !done.load(Ordering::SeqCst) {
        unsafe {
            libc::pthread_kill(tid as libc::pthread_t, libc::SIGUSR1);
        }
        thread::sleep(Duration::from_millis(20));
    }

    let result = waiter.join().unwrap();
    assert!(!result.unwrap());
}
