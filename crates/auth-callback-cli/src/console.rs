//! Collaborators that print to stdout.

use auth_callback::{Navigator, Notifier};

pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn error(&self, message: &str) {
        println!("[error] {}", message);
    }

    fn success(&self, message: &str) {
        println!("[success] {}", message);
    }
}

pub struct ConsoleNavigator;

impl Navigator for ConsoleNavigator {
    fn navigate(&self, route: &str) {
        println!("[navigate] {}", route);
    }

    fn redirect(&self, url: &str) {
        println!("[redirect] {}", url);
    }
}
