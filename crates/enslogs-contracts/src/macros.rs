/// Declare a typed contract event.
///
/// Indexed parameters are listed first, as every bound contract declares
/// them. Each field gives its Rust name, its ABI name, its Rust type and its
/// ABI kind (a [`ParamKind`](enslogs_evm::ParamKind) variant).
///
/// ```ignore
/// contract_event! {
///     /// Logged when the owner of a node assigns a new owner to a subnode.
///     pub struct NewOwner {
///         indexed {
///             node("node"): B256 = FixedBytes(32),
///             label("label"): B256 = FixedBytes(32),
///         }
///         data {
///             owner("owner"): Address = Address,
///         }
///     }
/// }
/// ```
#[macro_export]
macro_rules! contract_event {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            indexed {
                $( $ifield:ident ($iname:literal): $ity:ty = $ikind:ident $(($iarg:literal))? ),* $(,)?
            }
            data {
                $( $dfield:ident ($dname:literal): $dty:ty = $dkind:ident $(($darg:literal))? ),* $(,)?
            }
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        $vis struct $name {
            $( pub $ifield: $ity, )*
            $( pub $dfield: $dty, )*
        }

        impl $name {
            /// Static description of this event.
            pub fn descriptor() -> &'static $crate::__private::EventDescriptor {
                use $crate::__private::{EventDescriptor, EventParam, ParamKind};
                static PARAMS: [EventParam; $crate::__count!($($ifield)* $($dfield)*)] = [
                    $( EventParam::indexed($iname, ParamKind::$ikind $(($iarg))?), )*
                    $( EventParam::data($dname, ParamKind::$dkind $(($darg))?), )*
                ];
                static DESCRIPTOR: EventDescriptor = EventDescriptor::new(stringify!($name), &PARAMS);
                &DESCRIPTOR
            }

            fn resolved() -> &'static $crate::__private::ResolvedEvent {
                static RESOLVED: ::std::sync::OnceLock<$crate::__private::ResolvedEvent> =
                    ::std::sync::OnceLock::new();
                RESOLVED.get_or_init(|| $crate::__private::ResolvedEvent::new(Self::descriptor().clone()))
            }

            /// Topic rules for the indexed arguments, in declaration order.
            /// An empty slice matches any value.
            #[allow(clippy::too_many_arguments)]
            pub fn rules($( $ifield: &[$ity] ),*) -> ::std::vec::Vec<$crate::__private::TopicRule> {
                ::std::vec![$( $crate::__private::topic_rule($ifield) ),*]
            }

            /// Encode this event as a log emitted by `address`.
            pub fn encode_log(
                &self,
                address: $crate::__private::Address,
            ) -> ::std::result::Result<$crate::__private::RawLog, $crate::__private::DecodeError> {
                use $crate::__private::ToSolValue;
                let fields: [&dyn ToSolValue; $crate::__count!($($ifield)* $($dfield)*)] =
                    [$( &self.$ifield, )* $( &self.$dfield, )*];
                let values: ::std::vec::Vec<_> = fields
                    .iter()
                    .zip(Self::descriptor().params.iter())
                    .map(|(field, param)| field.to_sol_value(param.kind))
                    .collect();
                Self::resolved().encode(address, &values)
            }
        }

        impl $crate::__private::ContractEvent for $name {
            const NAME: &'static str = stringify!($name);

            fn selector() -> ::std::option::Option<$crate::__private::B256> {
                Self::resolved().selector()
            }

            fn indexed_inputs() -> usize {
                $crate::__count!($($ifield)*)
            }

            fn decode_log(
                log: &$crate::__private::RawLog,
            ) -> ::std::result::Result<Self, $crate::__private::DecodeError> {
                let mut reader = $crate::__private::FieldReader::new(Self::resolved().decode(log)?);
                Ok(Self {
                    $( $ifield: reader.next($iname)?, )*
                    $( $dfield: reader.next($dname)?, )*
                })
            }
        }
    };
}

#[doc(hidden)]
#[macro_export]
macro_rules! __count {
    () => { 0usize };
    ($head:tt $($tail:tt)*) => { 1usize + $crate::__count!($($tail)*) };
}

/// Bind a contract: a sealed marker trait over its events and a wrapper whose
/// filter/watch methods only accept those events.
macro_rules! bound_contract {
    (
        $(#[$meta:meta])*
        pub struct $name:ident: $marker:ident, abi = $abi:expr, { $($event:ident),* $(,)? }
    ) => {
        #[doc = concat!("An event emitted by [`", stringify!($name), "`].")]
        pub trait $marker: $crate::__private::ContractEvent + $crate::sealed::Sealed {}

        $(
            impl $crate::sealed::Sealed for $event {}
            impl $marker for $event {}
        )*

        $(#[$meta])*
        #[derive(Debug, Clone)]
        pub struct $name {
            filterer: ::enslogs_stream::BoundFilterer,
        }

        impl $name {
            pub fn new(
                address: ::alloy_primitives::Address,
                source: ::std::sync::Arc<dyn ::enslogs_core::source::LogSource>,
            ) -> Self {
                Self {
                    filterer: ::enslogs_stream::BoundFilterer::new(address, source),
                }
            }

            pub fn address(&self) -> ::alloy_primitives::Address {
                self.filterer.address()
            }

            /// The contract's event ABI.
            pub fn abi() -> ::std::result::Result<::alloy_json_abi::JsonAbi, ::serde_json::Error> {
                ::serde_json::from_str($abi)
            }

            /// Descriptors of every event this contract emits.
            pub fn event_descriptors() -> ::std::vec::Vec<&'static ::enslogs_evm::EventDescriptor> {
                ::std::vec![$( $event::descriptor() ),*]
            }

            /// Iterate over `E` logs; see [`BoundFilterer::filter_logs`](::enslogs_stream::BoundFilterer::filter_logs).
            pub async fn filter_logs<E: $marker>(
                &self,
                opts: &::enslogs_core::filter::FilterOpts,
                rules: ::std::vec::Vec<::enslogs_core::filter::TopicRule>,
            ) -> ::std::result::Result<::enslogs_stream::LogIterator<E>, ::enslogs_core::error::StreamError> {
                self.filterer.filter_logs::<E>(opts, rules).await
            }

            /// Watch `E` logs; see [`BoundFilterer::watch_logs`](::enslogs_stream::BoundFilterer::watch_logs).
            pub async fn watch_logs<E: $marker>(
                &self,
                opts: &::enslogs_core::filter::WatchOpts,
                sink: ::tokio::sync::mpsc::Sender<::enslogs_core::event::EventLog<E>>,
                rules: ::std::vec::Vec<::enslogs_core::filter::TopicRule>,
            ) -> ::std::result::Result<::enslogs_stream::WatchHandle, ::enslogs_core::error::StreamError> {
                self.filterer.watch_logs::<E>(opts, sink, rules).await
            }
        }
    };
}
