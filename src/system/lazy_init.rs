/* This file is part of Caligo (https://caligo.network)
 *
 * Copyright (C) 2020-2026 Caligo developers
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as
 * published by the Free Software Foundation, either version 3 of the
 * License, or (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with this program.  If not, see <https://www.gnu.org/licenses/>.
 */

use std::future::Future;

use smol::lock::Mutex;

/// An async slot for a value that is expensive or effectful to
/// produce, and must be produced at most once. Typical code looks
/// like:
///
/// ```rust
/// struct Deployer {
///     instance: LazyInit<Instance>,
/// }
/// impl Deployer {
///     async fn instance(&self) -> Result<Instance> {
///         self.instance.get_or_try_init(async { derive_instance() }).await
///     }
/// }
/// ```
///
/// Every caller of `instance()` gets the same derived value, no matter
/// how often or how concurrently it is called.
pub struct LazyInit<T> {
    value: Mutex<Option<T>>,
}

impl<T> LazyInit<T> {
    pub fn new() -> Self {
        Self { value: Mutex::new(None) }
    }
}

impl<T: Clone> LazyInit<T> {
    /// Return the stored value, running `init` to produce it if no
    /// earlier call has. The slot lock is held while `init` runs, so
    /// concurrent callers coalesce onto a single execution and all
    /// see its result. A failed `init` leaves the slot empty and the
    /// error goes to the caller, so a later call retries.
    pub async fn get_or_try_init<E, F>(&self, init: F) -> std::result::Result<T, E>
    where
        F: Future<Output = std::result::Result<T, E>>,
    {
        let mut value = self.value.lock().await;
        if let Some(v) = &*value {
            return Ok(v.clone())
        }

        let v = init.await?;
        *value = Some(v.clone());
        Ok(v)
    }

    /// Return the stored value without initializing an empty slot.
    pub async fn peek(&self) -> Option<T> {
        self.value.lock().await.clone()
    }
}

impl<T> Default for LazyInit<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn init_runs_once() {
        smol::block_on(async {
            let slot: LazyInit<u32> = LazyInit::new();
            let runs = AtomicUsize::new(0);

            let a: Result<u32, ()> = slot
                .get_or_try_init(async {
                    runs.fetch_add(1, Ordering::SeqCst);
                    Ok(42)
                })
                .await;
            let b: Result<u32, ()> = slot
                .get_or_try_init(async {
                    runs.fetch_add(1, Ordering::SeqCst);
                    Ok(99)
                })
                .await;

            assert_eq!(a, Ok(42));
            assert_eq!(b, Ok(42));
            assert_eq!(runs.load(Ordering::SeqCst), 1);
        });
    }

    #[test]
    fn concurrent_callers_coalesce() {
        smol::block_on(async {
            let slot: LazyInit<u32> = LazyInit::new();
            let runs = AtomicUsize::new(0);

            let (a, b): (Result<u32, ()>, Result<u32, ()>) = futures::join!(
                slot.get_or_try_init(async {
                    runs.fetch_add(1, Ordering::SeqCst);
                    smol::Timer::after(std::time::Duration::from_millis(10)).await;
                    Ok(7)
                }),
                slot.get_or_try_init(async {
                    runs.fetch_add(1, Ordering::SeqCst);
                    Ok(8)
                }),
            );

            assert_eq!(a, Ok(7));
            assert_eq!(b, Ok(7));
            assert_eq!(runs.load(Ordering::SeqCst), 1);
        });
    }

    #[test]
    fn failed_init_is_retried() {
        smol::block_on(async {
            let slot: LazyInit<u32> = LazyInit::new();

            let failed: Result<u32, &str> =
                slot.get_or_try_init(async { Err("node offline") }).await;
            assert_eq!(failed, Err("node offline"));
            assert_eq!(slot.peek().await, None);

            let ok: Result<u32, &str> = slot.get_or_try_init(async { Ok(5) }).await;
            assert_eq!(ok, Ok(5));
            assert_eq!(slot.peek().await, Some(5));
        });
    }
}
