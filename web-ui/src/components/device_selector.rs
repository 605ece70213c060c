// Preview device size selector

use playground_core::DeviceProfile;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct DeviceSelectorProps {
    pub device: DeviceProfile,
    pub on_change: Callback<DeviceProfile>,
}

#[function_component(DeviceSelector)]
pub fn device_selector(props: &DeviceSelectorProps) -> Html {
    html! {
        <div class="device-selector">
            { for DeviceProfile::ALL.into_iter().map(|device| {
                let on_change = props.on_change.clone();
                let onclick = Callback::from(move |_| on_change.emit(device));
                html! {
                    <button
                        class={classes!("device-btn", (props.device == device).then_some("active"))}
                        {onclick}
                    >
                        { device.label() }
                    </button>
                }
            }) }
        </div>
    }
}
