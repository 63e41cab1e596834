pub mod anytls;
pub mod hysteria;
pub mod shadowsocks;
pub mod socks;
pub mod transport;
pub mod trojan;
pub mod tuic;
pub mod vless;
pub mod vmess;
pub mod wireguard;

pub use anytls::AnyTlsProxy;
pub use hysteria::{Hysteria2Proxy, HysteriaProxy};
pub use shadowsocks::{
    ObfsPluginOpts, PluginOpts, ShadowsocksProxy, ShadowsocksRProxy, V2rayPluginOpts,
};
pub use socks::{HttpProxy, Socks5Proxy};
pub use transport::{
    GrpcOpts, H2Opts, HttpOpts, IpVersion, Network, RealityOpts, Transport, WsOpts,
};
pub use trojan::TrojanProxy;
pub use tuic::TuicProxy;
pub use vless::VlessProxy;
pub use vmess::VmessProxy;
pub use wireguard::WireGuardProxy;
