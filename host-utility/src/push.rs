// Commands that talk to the display

use anyhow::Result;
use epd_frame::{Canvas, blank_frame};

use crate::device::{DeviceClient, DeviceReply};
use crate::encode::{FrameSpec, build_frame};
use crate::progress::run_step;
use crate::utils::{self, format_with_separators};

fn upload(client: &DeviceClient, frame: &[u8]) -> Result<DeviceReply> {
    let label = format!(
        "Uploading {} bytes to {}",
        format_with_separators(frame.len()),
        client.display_url()
    );
    run_step(&label, || client.display(frame))
}

/// `epd-push status`
pub fn cmd_status(client: &DeviceClient) -> Result<()> {
    let label = format!("Querying {}", client.base_url());
    let reply = run_step(&label, || client.status())?;
    println!("{}", reply.body);
    Ok(())
}

/// `epd-push send`: single-plane frame, preceded by a status query
pub fn cmd_send(
    client: &DeviceClient,
    canvas: Canvas,
    spec: &FrameSpec<'_>,
    skip_status: bool,
) -> Result<()> {
    if !skip_status {
        cmd_status(client)?;
    }

    let frame = build_frame(spec, canvas)?;
    let reply = upload(client, &frame)?;
    println!("Text: {}", reply.body);
    Ok(())
}

/// `epd-push send-dual`: black plane followed by the inverted accent plane
pub fn cmd_send_dual(client: &DeviceClient, canvas: Canvas, spec: &FrameSpec<'_>) -> Result<()> {
    let frame = build_frame(spec, canvas)?;
    utils::info(&format!(
        "Payload: {} bytes",
        format_with_separators(frame.len())
    ));

    let reply = upload(client, &frame)?;
    println!("{}", reply.body);
    Ok(())
}

/// `epd-push clear`: blank both planes
pub fn cmd_clear(client: &DeviceClient, canvas: Canvas) -> Result<()> {
    let frame = blank_frame(canvas);
    let reply = upload(client, &frame)?;
    println!("{}", reply.body);
    Ok(())
}
