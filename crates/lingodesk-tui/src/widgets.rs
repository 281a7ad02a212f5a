pub mod app_logs;
pub mod confirm_dialog;
pub mod edit_form;
pub mod resource_list;
pub mod status_bar;
pub mod tab_bar;
pub mod toast;

#[cfg(test)]
pub(crate) fn buffer_to_string(buf: &ratatui::buffer::Buffer) -> String {
    let mut s = String::new();
    for y in 0..buf.area.height {
        for x in 0..buf.area.width {
            s.push_str(buf[(x, y)].symbol());
        }
        s.push('\n');
    }
    s
}
