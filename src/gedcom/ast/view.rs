//! The view wrapper shared by every typed record and structure.

/// Declare a view type accepted for the listed record kinds.
///
/// Generates the wrapper struct, `view`/`record`/`into_inner`, `Deref` to [`Record`],
/// `DerefMut` for mutable holders and the [`Annotated`] capability.
macro_rules! typed_view {
    ($(#[$meta:meta])* $name:ident => $($kind:pat_param)|+) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name<R = Record>(R);

        impl<R: ::std::borrow::Borrow<Record>> $name<R> {
            /// Wrap `record` when its kind matches this view.
            pub fn view(record: R) -> Option<Self> {
                if matches!(record.borrow().kind(), $($kind)|+) {
                    Some(Self(record))
                } else {
                    None
                }
            }

            #[allow(dead_code)]
            pub(crate) fn unchecked(record: R) -> Self {
                Self(record)
            }

            pub fn record(&self) -> &Record {
                self.0.borrow()
            }

            pub fn into_inner(self) -> R {
                self.0
            }
        }

        impl<R: ::std::borrow::BorrowMut<Record>> $name<R> {
            pub fn record_mut(&mut self) -> &mut Record {
                self.0.borrow_mut()
            }
        }

        impl<R: ::std::borrow::Borrow<Record>> ::std::ops::Deref for $name<R> {
            type Target = Record;

            fn deref(&self) -> &Record {
                self.0.borrow()
            }
        }

        impl<R: ::std::borrow::BorrowMut<Record>> ::std::ops::DerefMut for $name<R> {
            fn deref_mut(&mut self) -> &mut Record {
                self.0.borrow_mut()
            }
        }

        impl<R: ::std::borrow::Borrow<Record>> $crate::gedcom::ast::Annotated for $name<R> {
            fn node(&self) -> &Record {
                self.0.borrow()
            }
        }

        impl From<$name<Record>> for Record {
            fn from(view: $name<Record>) -> Record {
                view.0
            }
        }
    };
}
