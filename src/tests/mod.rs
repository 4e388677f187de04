mod framing;
mod packet;
mod registry;
mod wire;
