pub mod area;
pub mod fragment;
pub mod output;
pub mod request;
pub mod settings;

pub use self::area::AnalysisArea;
pub use self::fragment::{BufferConfig, Fragment, FragmentKind, FragmentLabel};
pub use self::output::{BufferSummary, OutputAttributes, OutputGraphic};
pub use self::request::{AnalysisDocument, AnalysisRequest, AreaSpec};
pub use self::settings::{BufferSpec, BufferZone, LayerSettings, NumericClass, SettingsKind};
