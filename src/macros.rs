/// Defines a graph variant: a thin wrapper around [`GraphCore`] whose capability flags are fixed
/// at construction, with its constructors and the [`GraphStore`] implementation.
///
/// The capability traits the variant supports are implemented by listing them after the
/// capabilities.
///
/// [`GraphCore`]: crate::engine::GraphCore
/// [`GraphStore`]: crate::GraphStore
macro_rules! graph_variant {
    ($(#[$doc:meta])* $name:ident, $capabilities:expr $(, $capability:ident)* $(,)?) => {
        $(#[$doc])*
        #[derive(Clone)]
        pub struct $name<VL = (), EL = ()> {
            core: crate::engine::GraphCore<VL, EL>,
        }

        impl<VL, EL> $name<VL, EL> {
            /// Capability flags shared by every graph of this type.
            pub const CAPABILITIES: crate::Capabilities = $capabilities;

            /// Creates an empty graph.
            pub fn new() -> Self {
                Self::with_num_vertices(0)
            }

            /// Creates a graph with the vertices `0..n`.
            ///
            /// # Panics
            ///
            /// Panics if `n` exceeds the number of valid vertex numbers.
            pub fn with_num_vertices(n: usize) -> Self {
                let config = crate::GraphConfig::new().with_capabilities(Self::CAPABILITIES);
                Self {
                    core: crate::engine::GraphCore::with_num_vertices(config, n),
                }
            }

            /// Creates a graph holding `vertices`, stored in the given slot order.
            pub fn with_vertices(
                vertices: impl IntoIterator<Item = crate::Vertex>,
            ) -> crate::Result<Self> {
                Self::with_config(crate::GraphConfig::new(), vertices)
            }

            /// Creates a graph holding `vertices` with the given configuration.
            ///
            /// The capability flags of `config` are replaced by those of this graph type.
            pub fn with_config(
                config: crate::GraphConfig,
                vertices: impl IntoIterator<Item = crate::Vertex>,
            ) -> crate::Result<Self> {
                let config = config.with_capabilities(Self::CAPABILITIES);
                crate::engine::GraphCore::new(config, vertices).map(|core| Self { core })
            }
        }

        impl<VL, EL> Default for $name<VL, EL> {
            fn default() -> Self {
                Self::new()
            }
        }

        impl<VL, EL> std::fmt::Debug for $name<VL, EL> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                use crate::GraphStore;
                f.debug_struct(stringify!($name))
                    .field("vertices", &self.vertices())
                    .field("edges", &self.edges().collect::<Vec<_>>())
                    .finish()
            }
        }

        impl<VL, EL> crate::GraphStore for $name<VL, EL> {
            type VertexLabel = VL;
            type EdgeLabel = EL;

            #[inline]
            fn core(&self) -> &crate::engine::GraphCore<VL, EL> {
                &self.core
            }

            #[inline]
            fn core_mut(&mut self) -> &mut crate::engine::GraphCore<VL, EL> {
                &mut self.core
            }

            fn from_core(core: crate::engine::GraphCore<VL, EL>) -> Self {
                Self { core }
            }
        }

        $(impl<VL, EL> crate::$capability for $name<VL, EL> {})*
    };
}
pub(crate) use graph_variant;
